use crate::context::{load_config, load_registry};
use crate::errors::CliError;
use crate::GlobalOpts;
use colored::Colorize;
use spice_manifest::{FeatureSpec, Manifest};

/// List registered features, or show one in detail
pub fn list_features(opts: &GlobalOpts, name: Option<String>) -> Result<(), CliError> {
    let config = load_config()?;
    let manifest = load_registry(&config)?.manifest();

    if let Some(ref name) = name {
        return show_feature_details(&manifest, name);
    }

    println!(
        "{} {}",
        "Features:".bold().green(),
        format!("({})", manifest.project).dimmed()
    );
    let width = manifest
        .features
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0);
    for spec in &manifest.features {
        let depends = if spec.is_source() {
            "raw record".dimmed().to_string()
        } else {
            spec.format_depends()
        };
        let padded = format!("{:<width$}", spec.name, width = width);
        println!("  {}  <- {}", padded.bold().blue(), depends);
        if opts.verbosity_level() > 0 {
            println!("  {:<width$}     fn {}", "", spec.function, width = width);
        }
    }
    println!();
    println!("{}: {}", "Total features".bold(), manifest.len());
    Ok(())
}

fn show_feature_details(manifest: &Manifest, name: &str) -> Result<(), CliError> {
    let spec: &FeatureSpec = manifest
        .get(name)
        .ok_or_else(|| CliError::UnknownFeature(name.to_string()))?;

    println!("{}", spec.name.bold().blue());
    println!("  {}: {}", "function".cyan(), spec.function);
    if spec.is_source() {
        println!("  {}: {}", "depends".cyan(), "(raw record)".dimmed());
    } else {
        println!("  {}: {}", "depends".cyan(), spec.format_depends());
    }

    let dependents: Vec<&str> = manifest
        .dependents_of(name)
        .iter()
        .map(|f| f.name.as_ref())
        .collect();
    if !dependents.is_empty() {
        println!("  {}: {}", "used by".cyan(), dependents.join(", "));
    }
    Ok(())
}

use crate::context::{load_config, load_registry};
use crate::errors::CliError;
use crate::logger;
use clap::ValueEnum;
use spice_manifest::{write_to_path, ManifestFormat};
use std::fs;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Toml,
    Json,
}

impl From<ExportFormat> for ManifestFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Toml => ManifestFormat::Toml,
            ExportFormat::Json => ManifestFormat::Json,
        }
    }
}

/// Print the manifest, or write it to `output`
///
/// Without `--format`, a file's extension picks the format and stdout gets TOML.
pub fn handle_export(
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config()?;
    let manifest = load_registry(&config)?.manifest();

    match (output, format) {
        (Some(path), None) => {
            write_to_path(&manifest, &path)?;
            logger::success(&format!("Manifest written to {}", path.display()));
        }
        (Some(path), Some(format)) => {
            let content = ManifestFormat::from(format).render(&manifest)?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            logger::success(&format!("Manifest written to {}", path.display()));
        }
        (None, format) => {
            let format = format.map(ManifestFormat::from).unwrap_or_default();
            println!("{}", format.render(&manifest)?);
        }
    }
    Ok(())
}

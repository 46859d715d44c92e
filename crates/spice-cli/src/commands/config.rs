use crate::context::load_config;
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::*;
use spice_config::config::CONFIG_KEYS;
use spice_config::Config;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the current configuration (secret masked)
    Show,
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print the path to the config file
    Path,
}

pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = load_config()?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            // Edit the file alone so environment overrides are not persisted
            let path = Config::path()?;
            let mut config = Config::load_from_path(&path)?;
            config.set(&key, value).map_err(|e| {
                CliError::InvalidArgs(format!(
                    "{}. Supported keys: {}",
                    e,
                    CONFIG_KEYS.join(", ")
                ))
            })?;
            config.save_to_path(&path)?;
            logger::success(&format!("Set {}", key));
            if key == "client-secret" {
                logger::warn(&format!(
                    "client secret is stored in plain text at {}; prefer SPICE_CLIENT_SECRET",
                    path.display()
                ));
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}

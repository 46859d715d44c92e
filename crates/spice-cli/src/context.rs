//! Shared setup for commands: config, credentials and the registry handle

use crate::errors::CliError;
use crate::logger;
use spice_config::Config;
use spice_manifest::Registry;

/// Load config (file + environment overrides)
pub fn load_config() -> Result<Config, CliError> {
    let path = Config::path()?;
    if path.exists() {
        logger::debug(&format!("Reading config from: {}", path.display()));
    } else {
        logger::step(&format!(
            "No config file at {}, using environment only",
            path.display()
        ));
    }
    Ok(Config::load()?)
}

/// Build the taxi feature registry with configured credentials
pub fn load_registry(config: &Config) -> Result<Registry, CliError> {
    let credentials = config.credentials()?;
    logger::debug(&format!("Using client id {}", credentials.client_id()));
    Ok(nyc_taxi_features::build_registry(credentials))
}

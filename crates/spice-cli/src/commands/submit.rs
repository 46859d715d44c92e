use crate::context::{load_config, load_registry};
use crate::errors::CliError;
use crate::logger;
use spice_manifest::FileRegistryClient;
use std::path::PathBuf;

/// Submit the manifest, recording it under `dir` (or the configured manifest dir)
pub fn handle_submit(dir: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config()?;
    let registry = load_registry(&config)?;
    let dir = match dir {
        Some(dir) => dir,
        None => config.get_manifest_dir()?,
    };
    let client = FileRegistryClient::new(dir);

    logger::spinner_start(&format!("Submitting '{}'", registry.project()));
    match registry.submit(&client) {
        Ok(()) => {
            logger::spinner_success(&format!(
                "Submitted {} features to {}",
                registry.len(),
                client.submission_path(registry.project()).display()
            ));
            Ok(())
        }
        Err(e) => {
            logger::spinner_error("Submission failed");
            Err(e.into())
        }
    }
}

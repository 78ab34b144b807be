//! Single-secret commands.

use tracing::info;

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::remote::SecretStore;
use crate::error::Result;

/// Create or overwrite one secret.
pub fn set(settings: &Settings, name: &str, value: &str) -> Result<()> {
    info!(name, "putting secret");
    settings.client()?.put_secret(name, value)?;
    output::success(&format!("set {} in {}", name, settings.target));
    Ok(())
}

/// Delete one secret.
pub fn rm(settings: &Settings, name: &str) -> Result<()> {
    info!(name, "deleting secret");
    settings.client()?.delete_secret(name)?;
    output::success(&format!("removed {} from {}", name, settings.target));
    Ok(())
}

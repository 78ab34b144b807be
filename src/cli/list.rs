//! List command - show the repository's secret names.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::remote::SecretStore;
use crate::error::Result;

/// List remote secrets in API order.
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let mut client = settings.client()?;
    let secrets = client.list_secrets()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&secrets)?);
        return Ok(());
    }

    if secrets.is_empty() {
        output::dimmed(&format!("no secrets in {}", settings.target));
        return Ok(());
    }

    output::header(&format!("{} secrets in {}", secrets.len(), settings.target));
    for secret in &secrets {
        output::kv(
            &secret.name,
            format!("updated {}", secret.updated_at.format("%Y-%m-%d %H:%M")),
        );
    }

    Ok(())
}

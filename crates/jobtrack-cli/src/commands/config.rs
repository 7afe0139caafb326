use anyhow::{Context, Result};
use jobtrack_core::config::ClientConfig;

pub fn show(config: &ClientConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

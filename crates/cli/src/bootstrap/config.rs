use dnslookup_domain::{CliOverrides, Config};
use tracing::error;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::types::PollerError;

use super::{paths, Config};

impl Config {
    /// Load configuration from config.json
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let loaded = match paths::get_config_path() {
            Ok(path) => Self::load_from(&path).await,
            Err(err) => Err(err),
        };

        match loaded {
            Ok(config) => {
                info!(
                    rpc_url = %config.rpc_url,
                    interval_ms = config.poll_interval_ms,
                    accounts = config.accounts.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path. A missing file yields defaults.
    pub async fn load_from(config_path: &Path) -> Result<Self, PollerError> {
        if !config_path.exists() {
            warn!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path).await?;

        serde_json::from_str(&contents)
            .map_err(|err| PollerError::Config(format!("Failed to parse config.json: {err}")))
    }
}

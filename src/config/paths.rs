use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::PollerError;

use super::Config;

pub const CONFIG_PATH_ENV: &str = "SEADRIVE_NOTIFIER_CONFIG";

impl Config {
    /// Interval between two poll ticks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Upper bound for a single RPC request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}

/// Get the path to the config.json file
/// Honours SEADRIVE_NOTIFIER_CONFIG, then the app directory (parent of the binary's folder)
pub(super) fn get_config_path() -> Result<PathBuf, PollerError> {
    if let Ok(custom) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    // Executable is at: app_root/bin/seadrive-notifier
    // Config should be at: app_root/config.json
    if let Ok(exe_path) = std::env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(app_root) = exe_path.parent().and_then(|bin_dir| bin_dir.parent()) {
            let config_path = app_root.join("config.json");
            debug!(path = %config_path.display(), "Looking for config");
            return Ok(config_path);
        }
    }

    warn!("Using fallback: looking for config.json in current directory");
    Ok(PathBuf::from("config.json"))
}

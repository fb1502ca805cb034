use serde::{Deserialize, Serialize};

/// Configuration for the notification poller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_notify")]
    pub notify: bool,

    #[serde(default)]
    pub hide_windows_incompatible_path_msg: bool,

    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// One logged-in account, keyed by the daemon's domain id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountConfig {
    pub domain_id: String,
    #[serde(default)]
    pub server_url: String,
    #[serde(default)]
    pub username: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            notify: default_notify(),
            hide_windows_incompatible_path_msg: false,
            accounts: Vec::new(),
        }
    }
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:13419/rpc".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    800
}

fn default_notify() -> bool {
    true
}

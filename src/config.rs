mod loader;
mod paths;
mod types;

pub use types::{AccountConfig, Config};

use crate::collaborators::{Account, AccountResolver, Settings};

impl Settings for Config {
    fn notifications_enabled(&self) -> bool {
        self.notify
    }

    fn hide_windows_incompatible_path_msg(&self) -> bool {
        self.hide_windows_incompatible_path_msg
    }
}

/// Resolves accounts from the `accounts` list in config.json.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredAccounts {
    accounts: Vec<AccountConfig>,
}

impl ConfiguredAccounts {
    pub fn new(accounts: Vec<AccountConfig>) -> Self {
        Self { accounts }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.accounts.clone())
    }
}

impl AccountResolver for ConfiguredAccounts {
    fn account_for_domain(&self, domain_id: &str) -> Option<Account> {
        self.accounts
            .iter()
            .find(|entry| entry.domain_id == domain_id)
            .map(|entry| Account {
                domain_id: entry.domain_id.clone(),
                server_url: entry.server_url.clone(),
                username: entry.username.clone(),
            })
            .filter(Account::is_valid)
    }
}

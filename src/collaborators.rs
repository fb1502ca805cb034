//! Capability interfaces the poller drives: the tray surface, the deletion
//! prompt, account lookup, link commands and user settings.

use async_trait::async_trait;
use serde::Serialize;

use crate::events::SyncError;
use crate::types::PollerError;

/// Icon/urgency of a tray balloon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Information,
    Warning,
}

/// A balloon message for the tray, optionally tied to a library commit so the
/// tray can open the matching history view when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TrayMessage {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_commit_id: Option<String>,
    pub severity: Severity,
}

impl TrayMessage {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::info(title, body)
        }
    }

    pub fn with_repo(mut self, repo_id: &str) -> Self {
        self.repo_id = non_empty(repo_id);
        self
    }

    pub fn with_commit(mut self, commit_id: &str, parent_commit_id: &str) -> Self {
        self.commit_id = non_empty(commit_id);
        self.parent_commit_id = non_empty(parent_commit_id);
        self
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub trait TrayNotifier: Send + Sync {
    fn show_message(&self, message: TrayMessage);
    fn show_warning_message(&self, title: &str, body: &str);
    fn rotate(&self, active: bool);
    fn set_transfer_rate(&self, sent_bytes: u64, recv_bytes: u64);
    /// Replaces the whole displayed error set.
    fn set_sync_errors(&self, errors: Vec<SyncError>);
}

#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Returns true when the user confirms the deletion.
    async fn confirm_deletion(&self, text: &str, info: &str) -> bool;
}

/// A server account the daemon knows by domain id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub domain_id: String,
    pub server_url: String,
    pub username: String,
}

impl Account {
    pub fn is_valid(&self) -> bool {
        !self.server_url.is_empty() && !self.username.is_empty()
    }
}

pub trait AccountResolver: Send + Sync {
    fn account_for_domain(&self, domain_id: &str) -> Option<Account>;
}

#[async_trait]
pub trait LinkCommands: Send + Sync {
    async fn share_link(&self, account: &Account, repo_id: &str, path: &str)
        -> Result<(), PollerError>;

    async fn internal_link(
        &self,
        account: &Account,
        repo_id: &str,
        path: &str,
        is_dir: bool,
    ) -> Result<(), PollerError>;

    async fn upload_link(&self, account: &Account, repo_id: &str, path: &str)
        -> Result<(), PollerError>;

    async fn show_file_history(
        &self,
        account: &Account,
        repo_id: &str,
        path: &str,
    ) -> Result<(), PollerError>;
}

pub trait Settings: Send + Sync {
    fn notifications_enabled(&self) -> bool;

    /// Hide errors about paths that are invalid on Windows.
    fn hide_windows_incompatible_path_msg(&self) -> bool {
        false
    }
}

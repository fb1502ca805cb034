//! Turns decoded events into tray messages, deletion prompts, link commands
//! and internal signals.

pub mod messages;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::collaborators::{
    Account, AccountResolver, ConfirmationPrompt, LinkCommands, Settings, TrayMessage,
    TrayNotifier,
};
use crate::events::{
    ActionKind, ActionRequest, CommitInfo, DecodedEvent, DownloadStage, FsOpError,
    GlobalSyncStatus, SeaDriveEvent, SyncError, SyncErrorDetail, SyncErrorId, SyncNotification,
};
use crate::rpc::RpcChannel;

/// Signals emitted to the rest of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerSignal {
    /// The drive finished loading all libraries.
    FilesystemLoaded,
}

/// Everything the dispatcher acts on besides the RPC channel. Optional
/// capabilities turn their dispatch arm into a no-op when absent.
#[derive(Clone)]
pub struct Collaborators {
    pub tray: Arc<dyn TrayNotifier>,
    pub prompt: Arc<dyn ConfirmationPrompt>,
    pub accounts: Arc<dyn AccountResolver>,
    pub link_commands: Option<Arc<dyn LinkCommands>>,
    pub settings: Arc<dyn Settings>,
}

/// Last drive event seen. Recorded for bookkeeping only; nothing reads it to
/// suppress duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMemo {
    pub last_event_path: String,
    pub last_event_type: String,
}

pub struct Dispatcher {
    rpc: Arc<dyn RpcChannel>,
    collaborators: Collaborators,
    signals: broadcast::Sender<PollerSignal>,
}

impl Dispatcher {
    pub fn new(rpc: Arc<dyn RpcChannel>, collaborators: Collaborators) -> Self {
        let (signals, _) = broadcast::channel(16);
        Self {
            rpc,
            collaborators,
            signals,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PollerSignal> {
        self.signals.subscribe()
    }

    pub async fn dispatch(&self, event: DecodedEvent, memo: &mut EventMemo) {
        match event {
            DecodedEvent::Drive(event) => self.process_drive_event(&event, memo),
            DecodedEvent::Notification(notification) => {
                self.process_notification(&notification).await
            }
            DecodedEvent::Status(status) => self.apply_sync_status(&status),
            DecodedEvent::SyncErrors(errors) => self.apply_sync_errors(errors),
        }
    }

    pub async fn process_notification(&self, notification: &SyncNotification) {
        match notification {
            SyncNotification::SyncDone(commit) => {
                if self.collaborators.settings.notifications_enabled() {
                    self.show_commit(messages::synchronized_title(&commit.repo_name), commit);
                }
            }
            SyncNotification::SyncError { commit, error } => self.show_sync_error(commit, error),
            SyncNotification::MultipartUpload(commit) => {
                if self.collaborators.settings.notifications_enabled() {
                    self.show_commit(messages::uploading_title(&commit.repo_name), commit);
                }
            }
            SyncNotification::FsLoaded(_) => {
                self.collaborators.tray.show_message(TrayMessage::info(
                    messages::FS_LOADED_TITLE,
                    messages::FS_LOADED_BODY,
                ));
                info!("All libraries are loaded");
                // No subscribers is fine.
                let _ = self.signals.send(PollerSignal::FilesystemLoaded);
            }
            SyncNotification::CrossRepoMove(movement) => {
                let (title, body) = messages::cross_repo_move(
                    movement.stage,
                    &movement.src_path,
                    &movement.dst_path,
                );
                self.collaborators
                    .tray
                    .show_message(TrayMessage::info(title, body));
            }
            SyncNotification::DeleteConfirmation(confirmation) => {
                let text = messages::delete_confirmation_text(&confirmation.delete_files);
                let info = messages::delete_confirmation_info(&confirmation.repo_name);
                self.confirm_and_reply(&confirmation.confirmation_id, &text, &info)
                    .await;
            }
            SyncNotification::DeleteRepoConfirmation(confirmation) => {
                let text = messages::delete_repo_text(&confirmation.repo_name);
                let info = messages::delete_repo_info(&confirmation.repo_name);
                self.confirm_and_reply(&confirmation.confirmation_id, &text, &info)
                    .await;
            }
            SyncNotification::Action(request) => self.run_action(request).await,
            SyncNotification::Unknown { kind, .. } => {
                warn!(kind = %kind, "Unknown message");
            }
        }
    }

    pub fn process_drive_event(&self, event: &SeaDriveEvent, memo: &mut EventMemo) {
        let tray = &self.collaborators.tray;
        memo.last_event_path = event.path.clone();

        if let Some(stage) = event.download() {
            let body = match stage {
                DownloadStage::Started => messages::download_started(&event.path),
                DownloadStage::Finished => messages::download_finished(&event.path),
            };
            tray.show_message(TrayMessage::info(messages::DOWNLOAD_TITLE, body));
            memo.last_event_type = event.event_type.clone();
            return;
        }

        match event.fs_op_error {
            FsOpError::CreateRootFile => {
                let (title, body) = messages::create_root_file_failed(&event.path);
                tray.show_warning_message(&title, &body);
            }
            FsOpError::RemoveRepo => {
                let (title, body) = messages::remove_repo_refused(&event.path);
                tray.show_warning_message(&title, &body);
            }
            FsOpError::Unknown => {}
        }
    }

    pub fn apply_sync_status(&self, status: &GlobalSyncStatus) {
        let (sent, recv) = status.displayed_rate();
        self.collaborators.tray.rotate(status.is_syncing);
        self.collaborators.tray.set_transfer_rate(sent, recv);
    }

    /// Replaces the tray's error list with `errors`.
    pub fn apply_sync_errors(&self, errors: Vec<SyncError>) {
        self.collaborators.tray.set_sync_errors(errors);
    }

    fn show_commit(&self, title: String, commit: &CommitInfo) {
        let message = TrayMessage::info(title, messages::translate_commit_desc(&commit.commit_desc))
            .with_repo(&commit.repo_id)
            .with_commit(&commit.commit_id, &commit.parent_commit_id);
        self.collaborators.tray.show_message(message);
    }

    fn show_sync_error(&self, commit: &CommitInfo, error: &SyncErrorDetail) {
        if error.error_id == SyncErrorId::InvalidPathOnWindows.code()
            && self.collaborators.settings.hide_windows_incompatible_path_msg()
        {
            debug!(path = %error.error_path, "Hiding Windows path incompatibility error");
            return;
        }

        let title = messages::sync_error_title(&commit.repo_name, &error.error_path);
        let message =
            TrayMessage::warning(title, error.error_message.clone()).with_repo(&commit.repo_id);
        self.collaborators.tray.show_message(message);
    }

    async fn confirm_and_reply(&self, confirmation_id: &str, text: &str, info: &str) {
        let confirmed = self.collaborators.prompt.confirm_deletion(text, info).await;
        let cancelled = !confirmed;
        if let Err(err) = self
            .rpc
            .add_delete_confirmation(confirmation_id, cancelled)
            .await
        {
            warn!(
                confirmation = %confirmation_id,
                cancelled,
                error = %err,
                "Failed to send delete confirmation"
            );
        }
    }

    async fn run_action(&self, request: &ActionRequest) {
        let Some(commands) = self.collaborators.link_commands.as_ref() else {
            debug!(kind = request.kind.as_str(), "No link command handler, ignoring");
            return;
        };
        let Some(account) = self
            .collaborators
            .accounts
            .account_for_domain(&request.domain_id)
            .filter(Account::is_valid)
        else {
            debug!(domain = %request.domain_id, "No valid account for domain");
            return;
        };

        let repo_id = request.repo_id.as_str();
        let path = request.repo_path.as_str();
        let result = match request.kind {
            ActionKind::ShareLink => commands.share_link(&account, repo_id, path).await,
            ActionKind::InternalLink => {
                commands
                    .internal_link(&account, repo_id, path, request.is_dir)
                    .await
            }
            ActionKind::UploadLink => commands.upload_link(&account, repo_id, path).await,
            ActionKind::ViewFileHistory => {
                commands.show_file_history(&account, repo_id, path).await
            }
        };

        if let Err(err) = result {
            warn!(
                kind = request.kind.as_str(),
                repo = %repo_id,
                path = %path,
                error = %err,
                "Link command failed"
            );
        }
    }
}

use serde_json::Value;
use tracing::debug;

use super::helpers::{bool_field, int_field, string_field};
use super::sync_error::describe_sync_error;

pub const SYNC_DONE: &str = "sync.done";
pub const SYNC_ERROR: &str = "sync.error";
pub const SYNC_MULTIPART_UPLOAD: &str = "sync.multipart_upload";
pub const FS_LOADED: &str = "fs-loaded";
pub const CROSS_REPO_MOVE_PREFIX: &str = "cross-repo-move.";
pub const DEL_CONFIRMATION: &str = "del_confirmation";
pub const DEL_REPO_CONFIRMATION: &str = "del_repo_confirmation";

/// Commit fields carried by the standard sync notifications.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitInfo {
    pub repo_id: String,
    pub repo_name: String,
    pub commit_id: String,
    pub parent_commit_id: String,
    pub commit_desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncErrorDetail {
    pub error_id: i64,
    pub error_path: String,
    pub error_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStage {
    Start,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRepoMove {
    pub stage: MoveStage,
    pub src_path: String,
    pub dst_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub confirmation_id: String,
    pub repo_name: String,
    /// Free-text summary such as `Deleted "a.txt" and 3 more files.`
    pub delete_files: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRepoConfirmation {
    pub confirmation_id: String,
    pub repo_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ShareLink,
    InternalLink,
    UploadLink,
    ViewFileHistory,
}

impl ActionKind {
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "action.get_share_link" => Some(ActionKind::ShareLink),
            "action.get_internal_link" => Some(ActionKind::InternalLink),
            "action.get_upload_link" => Some(ActionKind::UploadLink),
            "action.view_file_history" => Some(ActionKind::ViewFileHistory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::ShareLink => "action.get_share_link",
            ActionKind::InternalLink => "action.get_internal_link",
            ActionKind::UploadLink => "action.get_upload_link",
            ActionKind::ViewFileHistory => "action.view_file_history",
        }
    }
}

/// A request from the file manager extension, relayed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub repo_id: String,
    pub repo_path: String,
    pub domain_id: String,
    pub is_dir: bool,
}

/// A decoded sync notification. Each variant only carries the fields the
/// daemon fills in for that notification type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncNotification {
    SyncDone(CommitInfo),
    SyncError {
        commit: CommitInfo,
        error: SyncErrorDetail,
    },
    MultipartUpload(CommitInfo),
    FsLoaded(CommitInfo),
    CrossRepoMove(CrossRepoMove),
    DeleteConfirmation(DeleteConfirmation),
    DeleteRepoConfirmation(DeleteRepoConfirmation),
    Action(ActionRequest),
    Unknown {
        kind: String,
        commit: CommitInfo,
    },
}

pub fn is_sync_error_type(kind: &str) -> bool {
    kind == SYNC_ERROR
}

impl SyncNotification {
    pub fn from_value(value: &Value) -> Self {
        let kind = string_field(value, "type");

        if kind.starts_with(CROSS_REPO_MOVE_PREFIX) {
            let stage = match &kind[CROSS_REPO_MOVE_PREFIX.len()..] {
                "start" => Some(MoveStage::Start),
                "done" => Some(MoveStage::Done),
                "error" => Some(MoveStage::Error),
                _ => None,
            };
            let Some(stage) = stage else {
                debug!(kind = %kind, "Unknown cross repo move stage");
                return SyncNotification::Unknown {
                    kind,
                    commit: CommitInfo::default(),
                };
            };
            return SyncNotification::CrossRepoMove(CrossRepoMove {
                stage,
                src_path: string_field(value, "srcpath"),
                dst_path: string_field(value, "dstpath"),
            });
        }

        if kind == DEL_CONFIRMATION {
            return SyncNotification::DeleteConfirmation(DeleteConfirmation {
                confirmation_id: string_field(value, "confirmation_id"),
                repo_name: string_field(value, "repo_name"),
                delete_files: string_field(value, "delete_files"),
            });
        }

        if kind == DEL_REPO_CONFIRMATION {
            return SyncNotification::DeleteRepoConfirmation(DeleteRepoConfirmation {
                confirmation_id: string_field(value, "confirmation_id"),
                repo_name: string_field(value, "repo_name"),
            });
        }

        if let Some(action) = ActionKind::from_type(&kind) {
            return SyncNotification::Action(ActionRequest {
                kind: action,
                repo_id: string_field(value, "repo_id"),
                repo_path: string_field(value, "repo_path"),
                domain_id: string_field(value, "domain_id"),
                is_dir: bool_field(value, "is_dir"),
            });
        }

        let commit = CommitInfo {
            repo_id: string_field(value, "repo_id"),
            repo_name: string_field(value, "repo_name"),
            commit_id: string_field(value, "commit_id"),
            parent_commit_id: string_field(value, "parent_commit_id"),
            commit_desc: string_field(value, "commit_desc"),
        };

        if is_sync_error_type(&kind) {
            let error_id = int_field(value, "err_id");
            let error_path = string_field(value, "path");
            let error_message = describe_sync_error(error_id, &error_path);
            return SyncNotification::SyncError {
                commit,
                error: SyncErrorDetail {
                    error_id,
                    error_path,
                    error_message,
                },
            };
        }

        match kind.as_str() {
            SYNC_DONE => SyncNotification::SyncDone(commit),
            SYNC_MULTIPART_UPLOAD => SyncNotification::MultipartUpload(commit),
            FS_LOADED => SyncNotification::FsLoaded(commit),
            _ => {
                debug!(kind = %kind, "Unrecognised sync notification type");
                SyncNotification::Unknown { kind, commit }
            }
        }
    }

    /// The wire tag this notification was decoded from.
    pub fn type_name(&self) -> &str {
        match self {
            SyncNotification::SyncDone(_) => SYNC_DONE,
            SyncNotification::SyncError { .. } => SYNC_ERROR,
            SyncNotification::MultipartUpload(_) => SYNC_MULTIPART_UPLOAD,
            SyncNotification::FsLoaded(_) => FS_LOADED,
            SyncNotification::CrossRepoMove(movement) => match movement.stage {
                MoveStage::Start => "cross-repo-move.start",
                MoveStage::Done => "cross-repo-move.done",
                MoveStage::Error => "cross-repo-move.error",
            },
            SyncNotification::DeleteConfirmation(_) => DEL_CONFIRMATION,
            SyncNotification::DeleteRepoConfirmation(_) => DEL_REPO_CONFIRMATION,
            SyncNotification::Action(request) => request.kind.as_str(),
            SyncNotification::Unknown { kind, .. } => kind,
        }
    }
}

//! Decoding of the daemon's loosely typed JSON replies into typed events.

mod drive_event;
mod helpers;
mod notification;
mod status;
mod sync_error;

use serde_json::Value;
use thiserror::Error;

pub use drive_event::{DownloadStage, FsOpError, SeaDriveEvent};
pub use helpers::{base_name, parent_path};
pub use notification::{
    is_sync_error_type, ActionKind, ActionRequest, CommitInfo, CrossRepoMove, DeleteConfirmation,
    DeleteRepoConfirmation, MoveStage, SyncErrorDetail, SyncNotification,
};
pub use status::GlobalSyncStatus;
pub use sync_error::{describe_sync_error, SyncError, SyncErrorId};

/// Which of the four daemon queries a payload answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    DriveEvents,
    Notification,
    GlobalSyncStatus,
    SyncErrors,
}

impl PayloadKind {
    /// Poll order within one tick.
    pub const ALL: [PayloadKind; 4] = [
        PayloadKind::DriveEvents,
        PayloadKind::Notification,
        PayloadKind::GlobalSyncStatus,
        PayloadKind::SyncErrors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::DriveEvents => "events",
            PayloadKind::Notification => "notification",
            PayloadKind::GlobalSyncStatus => "globalSyncStatus",
            PayloadKind::SyncErrors => "syncErrors",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    Drive(SeaDriveEvent),
    Notification(SyncNotification),
    Status(GlobalSyncStatus),
    SyncErrors(Vec<SyncError>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{kind} payload is not a JSON object")]
    NotAnObject { kind: PayloadKind },
}

/// Decode one reply. Unknown type tags never fail: they come back as the
/// unknown variant of the matching event.
pub fn decode(kind: PayloadKind, payload: &Value) -> Result<DecodedEvent, DecodeError> {
    if kind == PayloadKind::SyncErrors {
        return Ok(DecodedEvent::SyncErrors(SyncError::list_from_value(payload)));
    }

    if !payload.is_object() {
        return Err(DecodeError::NotAnObject { kind });
    }

    let event = match kind {
        PayloadKind::DriveEvents => DecodedEvent::Drive(SeaDriveEvent::from_value(payload)),
        PayloadKind::Notification => {
            DecodedEvent::Notification(SyncNotification::from_value(payload))
        }
        PayloadKind::GlobalSyncStatus => {
            DecodedEvent::Status(GlobalSyncStatus::from_value(payload))
        }
        PayloadKind::SyncErrors => DecodedEvent::SyncErrors(SyncError::list_from_value(payload)),
    };
    Ok(event)
}

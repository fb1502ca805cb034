use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::helpers::string_field;

pub const FILE_DOWNLOAD_START: &str = "file-download.start";
pub const FILE_DOWNLOAD_DONE: &str = "file-download.done";

/// Filesystem operations the mount refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FsOpError {
    #[default]
    Unknown,
    CreateRootFile,
    RemoveRepo,
}

impl FsOpError {
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "fs_op_error.create_root_file" => FsOpError::CreateRootFile,
            "fs_op_error.remove_repo" => FsOpError::RemoveRepo,
            _ => FsOpError::Unknown,
        }
    }
}

/// An event raised by the virtual drive itself (downloads, refused operations).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SeaDriveEvent {
    pub fs_op_error: FsOpError,
    pub path: String,
    pub event_type: String,
}

impl SeaDriveEvent {
    pub fn from_value(value: &Value) -> Self {
        let event_type = string_field(value, "type");
        let fs_op_error = FsOpError::from_type(&event_type);
        let event = Self {
            fs_op_error,
            path: string_field(value, "path"),
            event_type,
        };
        if fs_op_error == FsOpError::Unknown && event.download().is_none() {
            warn!(kind = %event.event_type, "Unknown type of drive event");
        }
        event
    }

    pub fn download(&self) -> Option<DownloadStage> {
        match self.event_type.as_str() {
            FILE_DOWNLOAD_START => Some(DownloadStage::Started),
            FILE_DOWNLOAD_DONE => Some(DownloadStage::Finished),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStage {
    Started,
    Finished,
}

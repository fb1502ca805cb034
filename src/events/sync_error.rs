use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::helpers::{base_name, format_relative_time, int_field, string_field};

/// Error codes reported by the sync daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncErrorId {
    FileLockedByApp,
    FolderLockedByApp,
    FileLocked,
    InvalidPath,
    IndexError,
    AccessDenied,
    QuotaFull,
    Network,
    ResolveProxy,
    ResolveHost,
    Connect,
    Ssl,
    Tx,
    TxTimeout,
    UnhandledRedirect,
    Server,
    LocalDataCorrupt,
    WriteLocalData,
    ServerRepoDeleted,
    ServerRepoCorrupt,
    NotEnoughMemory,
    Conflict,
    GeneralError,
    NoError,
    RemoveUncommittedFolder,
    InvalidPathOnWindows,
    LibraryTooLarge,
}

impl SyncErrorId {
    pub fn from_code(code: i64) -> Option<Self> {
        use SyncErrorId::*;
        let id = match code {
            0 => FileLockedByApp,
            1 => FolderLockedByApp,
            2 => FileLocked,
            3 => InvalidPath,
            4 => IndexError,
            5 => AccessDenied,
            6 => QuotaFull,
            7 => Network,
            8 => ResolveProxy,
            9 => ResolveHost,
            10 => Connect,
            11 => Ssl,
            12 => Tx,
            13 => TxTimeout,
            14 => UnhandledRedirect,
            15 => Server,
            16 => LocalDataCorrupt,
            17 => WriteLocalData,
            18 => ServerRepoDeleted,
            19 => ServerRepoCorrupt,
            20 => NotEnoughMemory,
            21 => Conflict,
            22 => GeneralError,
            23 => NoError,
            24 => RemoveUncommittedFolder,
            25 => InvalidPathOnWindows,
            26 => LibraryTooLarge,
            _ => return None,
        };
        Some(id)
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    fn description(self) -> &'static str {
        use SyncErrorId::*;
        match self {
            FileLockedByApp => "File is locked by another application",
            FolderLockedByApp => "Folder is locked by another application",
            FileLocked => "File is locked by another user",
            InvalidPath => "Path is invalid",
            IndexError => "Error when indexing",
            AccessDenied => "You don't have enough permission",
            QuotaFull => "The storage quota of the library owner is used up",
            Network => "Network error",
            ResolveProxy => "Failed to resolve the proxy address",
            ResolveHost => "Failed to resolve the server address",
            Connect => "Failed to connect to the server",
            Ssl => "Failed to establish a secure connection. Please check the server SSL certificate",
            Tx => "Data transfer was interrupted. Please check the network or firewall",
            TxTimeout => "Data transfer timed out. Please check the network or firewall",
            UnhandledRedirect => "Unhandled HTTP redirect from the server. Please check the server configuration",
            Server => "Server error",
            LocalDataCorrupt => "Internal data is corrupted",
            WriteLocalData => "Failed to write data on the client. Please check the disk space or folder permissions",
            ServerRepoDeleted => "The library was deleted on the server",
            ServerRepoCorrupt => "The library is damaged on the server",
            NotEnoughMemory => "Not enough memory",
            Conflict => "Concurrent updates to the file. The file is saved as a conflict file",
            GeneralError => "Unknown error",
            NoError => "",
            RemoveUncommittedFolder => "The folder has unsynced changes and was moved to the cache",
            InvalidPathOnWindows => "The path contains symbols that are not supported on Windows",
            LibraryTooLarge => "The library is too large to sync",
        }
    }

    fn mentions_path(self) -> bool {
        matches!(
            self,
            SyncErrorId::FileLockedByApp
                | SyncErrorId::FolderLockedByApp
                | SyncErrorId::FileLocked
                | SyncErrorId::InvalidPath
                | SyncErrorId::InvalidPathOnWindows
        )
    }
}

/// Human readable message for a daemon error code and the path it concerns.
pub fn describe_sync_error(error_id: i64, path: &str) -> String {
    let Some(id) = SyncErrorId::from_code(error_id) else {
        return SyncErrorId::GeneralError.description().to_string();
    };

    let name = base_name(path);
    if id.mentions_path() && !name.is_empty() {
        format!("{}: \"{}\"", id.description(), name)
    } else {
        id.description().to_string()
    }
}

/// One outstanding error shown in the tray's error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncError {
    pub id: i64,
    pub repo_id: String,
    pub repo_name: String,
    pub path: String,
    pub error_id: i64,
    pub timestamp: i64,
    pub error_str: String,
    pub readable_time: String,
}

impl SyncError {
    pub fn from_value(value: &Value) -> Self {
        let path = string_field(value, "path");
        let error_id = int_field(value, "err_id");
        let timestamp = int_field(value, "timestamp");
        Self {
            id: int_field(value, "id"),
            repo_id: string_field(value, "repo_id"),
            repo_name: string_field(value, "repo_name"),
            error_str: describe_sync_error(error_id, &path),
            readable_time: format_relative_time(timestamp),
            path,
            error_id,
            timestamp,
        }
    }

    /// Decodes the daemon's error list. Anything that is not an array yields an
    /// empty list; non-object entries are dropped.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        let Some(entries) = value.as_array() else {
            if !value.is_null() {
                warn!("sync error list is not an array, treating as empty");
            }
            return Vec::new();
        };

        entries
            .iter()
            .filter(|entry| entry.is_object())
            .map(Self::from_value)
            .collect()
    }
}

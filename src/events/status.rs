use serde::Serialize;
use serde_json::Value;

use super::helpers::{bool_field, byte_count_field};

/// Daemon-wide transfer state, refreshed every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GlobalSyncStatus {
    pub is_syncing: bool,
    pub sent_bytes: u64,
    pub recv_bytes: u64,
}

impl GlobalSyncStatus {
    pub fn from_value(value: &Value) -> Self {
        Self {
            is_syncing: bool_field(value, "is_syncing"),
            sent_bytes: byte_count_field(value, "sent_bytes"),
            recv_bytes: byte_count_field(value, "recv_bytes"),
        }
    }

    /// Transfer rate to show in the tray; idle daemons always report zero.
    pub fn displayed_rate(&self) -> (u64, u64) {
        if self.is_syncing {
            (self.sent_bytes, self.recv_bytes)
        } else {
            (0, 0)
        }
    }
}

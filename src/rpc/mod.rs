mod client;
mod protocol;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::PollerError;

pub use client::HttpRpcClient;
pub use protocol::{RpcReply, RpcRequest};

/// Request/response channel to the sync daemon.
#[async_trait]
pub trait RpcChannel: Send + Sync {
    async fn is_connected(&self) -> bool;
    async fn get_seadrive_events(&self) -> Result<Value, PollerError>;
    async fn get_sync_notification(&self) -> Result<Value, PollerError>;
    async fn get_global_sync_status(&self) -> Result<Value, PollerError>;
    async fn get_sync_errors(&self) -> Result<Value, PollerError>;
    /// `cancelled` is true when the user declined the deletion.
    async fn add_delete_confirmation(
        &self,
        confirmation_id: &str,
        cancelled: bool,
    ) -> Result<(), PollerError>;
}

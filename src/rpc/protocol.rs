use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GET_EVENTS: &str = "seafile_get_events_notification";
pub const GET_SYNC_NOTIFICATION: &str = "seafile_get_sync_notification";
pub const GET_GLOBAL_SYNC_STATUS: &str = "seafile_get_global_sync_status";
pub const GET_SYNC_ERRORS: &str = "seafile_get_sync_errors";
pub const ADD_DEL_CONFIRMATION: &str = "seafile_add_del_confirmation";

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub method: &'a str,
    pub params: Vec<Value>,
}

/// Reply envelope: `{"ret": ...}` or `{"err_code": n, "err_msg": "..."}`.
#[derive(Debug, Deserialize, Default)]
pub struct RpcReply {
    #[serde(default)]
    pub ret: Option<Value>,
    #[serde(default)]
    pub err_code: Option<i64>,
    #[serde(default)]
    pub err_msg: Option<String>,
}

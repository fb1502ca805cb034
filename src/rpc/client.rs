use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::Config;
use crate::types::PollerError;

use super::protocol::{
    RpcReply, RpcRequest, ADD_DEL_CONFIRMATION, GET_EVENTS, GET_GLOBAL_SYNC_STATUS,
    GET_SYNC_ERRORS, GET_SYNC_NOTIFICATION,
};
use super::RpcChannel;

/// How long a dropped connection is reported as disconnected before the next
/// request is allowed to try again.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// JSON-RPC client for the daemon's local endpoint.
pub struct HttpRpcClient {
    http: Client,
    endpoint: String,
    disconnected_at: Mutex<Option<Instant>>,
}

impl HttpRpcClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PollerError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PollerError::Http)?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            disconnected_at: Mutex::new(None),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PollerError> {
        Self::new(config.rpc_url.trim(), config.request_timeout())
    }

    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<Value, PollerError> {
        let result = self.send(method, params).await;
        match &result {
            Err(err) if err.is_transport() => {
                let mut disconnected_at = self.disconnected_at.lock().await;
                if disconnected_at.is_none() {
                    warn!(method, error = %err, "Lost connection to the sync daemon");
                }
                *disconnected_at = Some(Instant::now());
            }
            _ => {
                let mut disconnected_at = self.disconnected_at.lock().await;
                if disconnected_at.take().is_some() {
                    debug!(method, "Reconnected to the sync daemon");
                }
            }
        }
        result
    }

    async fn send(&self, method: &'static str, params: Vec<Value>) -> Result<Value, PollerError> {
        let request = RpcRequest { method, params };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(PollerError::Http)?;

        if !response.status().is_success() {
            return Err(PollerError::Rpc {
                method,
                code: i64::from(response.status().as_u16()),
                message: format!("{} returned {}", method, response.status()),
            });
        }

        let reply: RpcReply = response.json().await.map_err(PollerError::Http)?;
        if let Some(code) = reply.err_code {
            return Err(PollerError::Rpc {
                method,
                code,
                message: reply.err_msg.unwrap_or_default(),
            });
        }

        match reply.ret {
            Some(Value::Null) | None => Err(PollerError::EmptyReply(method)),
            Some(value) => Ok(value),
        }
    }
}

#[async_trait]
impl RpcChannel for HttpRpcClient {
    async fn is_connected(&self) -> bool {
        match *self.disconnected_at.lock().await {
            None => true,
            Some(since) => since.elapsed() >= RECONNECT_DELAY,
        }
    }

    async fn get_seadrive_events(&self) -> Result<Value, PollerError> {
        self.call(GET_EVENTS, Vec::new()).await
    }

    async fn get_sync_notification(&self) -> Result<Value, PollerError> {
        self.call(GET_SYNC_NOTIFICATION, Vec::new()).await
    }

    async fn get_global_sync_status(&self) -> Result<Value, PollerError> {
        self.call(GET_GLOBAL_SYNC_STATUS, Vec::new()).await
    }

    async fn get_sync_errors(&self) -> Result<Value, PollerError> {
        self.call(GET_SYNC_ERRORS, Vec::new()).await
    }

    async fn add_delete_confirmation(
        &self,
        confirmation_id: &str,
        cancelled: bool,
    ) -> Result<(), PollerError> {
        let params = vec![json!(confirmation_id), json!(i32::from(cancelled))];
        match self.call(ADD_DEL_CONFIRMATION, params).await {
            // The daemon answers a void call with an empty return value.
            Ok(_) | Err(PollerError::EmptyReply(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    async fn serve(replies: Vec<&'static str>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/rpc", listener.local_addr().unwrap());
        (endpoint, serve_on(listener, replies))
    }

    /// Serves one canned JSON body per connection and hands back each request body.
    fn serve_on(listener: TcpListener, replies: Vec<&'static str>) -> JoinHandle<Vec<String>> {
        tokio::spawn(async move {
            let mut bodies = Vec::new();
            for reply in replies {
                let (mut socket, _) = listener.accept().await.unwrap();
                bodies.push(read_request_body(&mut socket).await);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.len(),
                    reply
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            bodies
        })
    }

    async fn read_request_body(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                let body_start = header_end + 4;
                if buffer.len() >= body_start + content_length {
                    return String::from_utf8_lossy(&buffer[body_start..body_start + content_length])
                        .to_string();
                }
            }
        }
        String::new()
    }

    #[tokio::test]
    async fn returns_payload_and_reports_daemon_errors() {
        let (endpoint, server) = serve(vec![
            r#"{"ret": {"is_syncing": 1, "sent_bytes": 10, "recv_bytes": 20}}"#,
            r#"{"ret": null}"#,
            r#"{"err_code": 501, "err_msg": "not ready"}"#,
        ])
        .await;
        let client = HttpRpcClient::new(endpoint, Duration::from_secs(5)).unwrap();

        let status = client.get_global_sync_status().await.unwrap();
        assert_eq!(status["sent_bytes"], 10);

        let err = client.get_sync_notification().await.unwrap_err();
        assert!(matches!(err, PollerError::EmptyReply(GET_SYNC_NOTIFICATION)));

        let err = client.get_sync_errors().await.unwrap_err();
        assert!(matches!(err, PollerError::Rpc { code: 501, .. }));
        assert!(client.is_connected().await);

        let bodies = server.await.unwrap();
        let first: Value = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(first["method"], GET_GLOBAL_SYNC_STATUS);
    }

    #[tokio::test]
    async fn delete_confirmation_sends_cancel_flag() {
        let (endpoint, server) = serve(vec![r#"{"ret": null}"#, r#"{"ret": 0}"#]).await;
        let client = HttpRpcClient::new(endpoint, Duration::from_secs(5)).unwrap();

        client.add_delete_confirmation("conf-1", true).await.unwrap();
        client.add_delete_confirmation("conf-2", false).await.unwrap();

        let bodies = server.await.unwrap();
        let declined: Value = serde_json::from_str(&bodies[0]).unwrap();
        let confirmed: Value = serde_json::from_str(&bodies[1]).unwrap();
        assert_eq!(declined["params"], json!(["conf-1", 1]));
        assert_eq!(confirmed["params"], json!(["conf-2", 0]));
    }

    #[tokio::test]
    async fn unreachable_daemon_reports_disconnected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/rpc", listener.local_addr().unwrap());
        drop(listener);

        let client = HttpRpcClient::new(endpoint, Duration::from_secs(2)).unwrap();
        assert!(client.is_connected().await);

        let err = client.get_seadrive_events().await.unwrap_err();
        assert!(err.is_transport());
        assert!(!client.is_connected().await);
    }

    #[tokio::test(start_paused = true)]
    async fn reconnects_after_delay() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/rpc", listener.local_addr().unwrap());
        drop(listener);

        let client = HttpRpcClient::new(endpoint, Duration::from_secs(2)).unwrap();
        client.get_global_sync_status().await.unwrap_err();
        assert!(!client.is_connected().await);

        tokio::time::advance(RECONNECT_DELAY / 2).await;
        assert!(!client.is_connected().await);

        tokio::time::advance(RECONNECT_DELAY).await;
        assert!(client.is_connected().await);
    }

    #[tokio::test]
    async fn successful_request_marks_connected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{addr}/rpc");
        let client = HttpRpcClient::new(endpoint, Duration::from_secs(2)).unwrap();
        client.get_seadrive_events().await.unwrap_err();
        assert!(!client.is_connected().await);

        let server = serve_on(
            TcpListener::bind(addr).await.unwrap(),
            vec![r#"{"ret": {"type": "file-download.done", "path": "/a"}}"#],
        );
        let event = client.get_seadrive_events().await.unwrap();
        assert_eq!(event["path"], "/a");
        assert!(client.is_connected().await);

        server.await.unwrap();
    }
}

use thiserror::Error;

/// Errors raised while talking to the daemon or preparing the poller.
#[derive(Debug, Error)]
pub enum PollerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC call {method} failed ({code}): {message}")]
    Rpc {
        method: &'static str,
        code: i64,
        message: String,
    },

    #[error("RPC call {0} returned nothing")]
    EmptyReply(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    Command(String),
}

impl PollerError {
    /// True for failures of the transport itself, as opposed to the daemon
    /// answering with an error or an empty reply.
    pub fn is_transport(&self) -> bool {
        match self {
            PollerError::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            PollerError::Io(_) => true,
            _ => false,
        }
    }
}

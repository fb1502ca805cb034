//! Event notification pipeline for the SeaDrive desktop client.
//!
//! A [`MessagePoller`] asks the sync daemon once per interval for pending drive
//! events, sync notifications, the global transfer status and the current
//! error list, decodes each reply into a typed event and dispatches it to the
//! tray, the deletion prompt or the link command handler.

pub mod collaborators;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod poller;
pub mod rpc;
pub mod surfaces;
pub mod types;

pub use collaborators::{
    Account, AccountResolver, ConfirmationPrompt, LinkCommands, Settings, Severity, TrayMessage,
    TrayNotifier,
};
pub use config::{Config, ConfiguredAccounts};
pub use dispatch::{Collaborators, Dispatcher, EventMemo, PollerSignal};
pub use events::{decode, DecodeError, DecodedEvent, PayloadKind};
pub use poller::{MessagePoller, PollerHandle};
pub use rpc::{HttpRpcClient, RpcChannel};
pub use types::PollerError;

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use seadrive_notifier::events::SyncError;
use seadrive_notifier::{
    Account, AccountResolver, Collaborators, ConfirmationPrompt, Dispatcher, LinkCommands,
    MessagePoller, PollerError, RpcChannel, Settings, TrayMessage, TrayNotifier,
};

pub const EVENTS: &str = "events";
pub const NOTIFICATION: &str = "notification";
pub const STATUS: &str = "status";
pub const ERRORS: &str = "errors";

pub enum Reply {
    Payload(Value),
    Fail,
}

/// In-memory daemon: queued replies per query, recorded calls.
pub struct FakeRpc {
    connected: AtomicBool,
    replies: Mutex<HashMap<&'static str, VecDeque<Reply>>>,
    calls: Mutex<Vec<&'static str>>,
    confirmations: Mutex<Vec<(String, bool)>>,
}

impl FakeRpc {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn push(&self, query: &'static str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(query)
            .or_default()
            .push_back(reply);
    }

    pub fn push_payload(&self, query: &'static str, payload: Value) {
        self.push(query, Reply::Payload(payload));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> Vec<(String, bool)> {
        self.confirmations.lock().unwrap().clone()
    }

    fn answer(&self, query: &'static str) -> Result<Value, PollerError> {
        self.calls.lock().unwrap().push(query);
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(query)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(Reply::Payload(value)) => Ok(value),
            Some(Reply::Fail) => Err(PollerError::Rpc {
                method: query,
                code: 500,
                message: "scripted failure".into(),
            }),
            None => Err(PollerError::EmptyReply(query)),
        }
    }
}

#[async_trait]
impl RpcChannel for FakeRpc {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn get_seadrive_events(&self) -> Result<Value, PollerError> {
        self.answer(EVENTS)
    }

    async fn get_sync_notification(&self) -> Result<Value, PollerError> {
        self.answer(NOTIFICATION)
    }

    async fn get_global_sync_status(&self) -> Result<Value, PollerError> {
        self.answer(STATUS)
    }

    async fn get_sync_errors(&self) -> Result<Value, PollerError> {
        self.answer(ERRORS)
    }

    async fn add_delete_confirmation(
        &self,
        confirmation_id: &str,
        cancelled: bool,
    ) -> Result<(), PollerError> {
        self.confirmations
            .lock()
            .unwrap()
            .push((confirmation_id.to_string(), cancelled));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrayEvent {
    Message(TrayMessage),
    Warning(String, String),
    Rotate(bool),
    Rate(u64, u64),
    Errors(Vec<SyncError>),
}

#[derive(Default)]
pub struct RecordingTray {
    events: Mutex<Vec<TrayEvent>>,
}

impl RecordingTray {
    pub fn events(&self) -> Vec<TrayEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<TrayMessage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TrayEvent::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TrayEvent::Warning(title, body) => Some((title, body)),
                _ => None,
            })
            .collect()
    }

    /// Error sets in the order they were pushed to the tray.
    pub fn error_sets(&self) -> Vec<Vec<SyncError>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TrayEvent::Errors(errors) => Some(errors),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: TrayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl TrayNotifier for RecordingTray {
    fn show_message(&self, message: TrayMessage) {
        self.record(TrayEvent::Message(message));
    }

    fn show_warning_message(&self, title: &str, body: &str) {
        self.record(TrayEvent::Warning(title.to_string(), body.to_string()));
    }

    fn rotate(&self, active: bool) {
        self.record(TrayEvent::Rotate(active));
    }

    fn set_transfer_rate(&self, sent_bytes: u64, recv_bytes: u64) {
        self.record(TrayEvent::Rate(sent_bytes, recv_bytes));
    }

    fn set_sync_errors(&self, errors: Vec<SyncError>) {
        self.record(TrayEvent::Errors(errors));
    }
}

/// Answers every deletion prompt the same way and records what was asked.
pub struct ScriptedPrompt {
    answer: AtomicBool,
    asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedPrompt {
    pub fn answering(confirm: bool) -> Self {
        Self {
            answer: AtomicBool::new(confirm),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationPrompt for ScriptedPrompt {
    async fn confirm_deletion(&self, text: &str, info: &str) -> bool {
        self.asked
            .lock()
            .unwrap()
            .push((text.to_string(), info.to_string()));
        self.answer.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeAccounts {
    accounts: HashMap<String, Account>,
}

impl FakeAccounts {
    pub fn with(mut self, domain_id: &str, server_url: &str, username: &str) -> Self {
        self.accounts.insert(
            domain_id.to_string(),
            Account {
                domain_id: domain_id.to_string(),
                server_url: server_url.to_string(),
                username: username.to_string(),
            },
        );
        self
    }
}

impl AccountResolver for FakeAccounts {
    fn account_for_domain(&self, domain_id: &str) -> Option<Account> {
        self.accounts.get(domain_id).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCall {
    pub command: &'static str,
    pub username: String,
    pub repo_id: String,
    pub path: String,
    pub is_dir: Option<bool>,
}

#[derive(Default)]
pub struct RecordingLinks {
    calls: Mutex<Vec<LinkCall>>,
}

impl RecordingLinks {
    pub fn calls(&self) -> Vec<LinkCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        command: &'static str,
        account: &Account,
        repo_id: &str,
        path: &str,
        is_dir: Option<bool>,
    ) {
        self.calls.lock().unwrap().push(LinkCall {
            command,
            username: account.username.clone(),
            repo_id: repo_id.to_string(),
            path: path.to_string(),
            is_dir,
        });
    }
}

#[async_trait]
impl LinkCommands for RecordingLinks {
    async fn share_link(
        &self,
        account: &Account,
        repo_id: &str,
        path: &str,
    ) -> Result<(), PollerError> {
        self.record("share_link", account, repo_id, path, None);
        Ok(())
    }

    async fn internal_link(
        &self,
        account: &Account,
        repo_id: &str,
        path: &str,
        is_dir: bool,
    ) -> Result<(), PollerError> {
        self.record("internal_link", account, repo_id, path, Some(is_dir));
        Ok(())
    }

    async fn upload_link(
        &self,
        account: &Account,
        repo_id: &str,
        path: &str,
    ) -> Result<(), PollerError> {
        self.record("upload_link", account, repo_id, path, None);
        Ok(())
    }

    async fn show_file_history(
        &self,
        account: &Account,
        repo_id: &str,
        path: &str,
    ) -> Result<(), PollerError> {
        self.record("show_file_history", account, repo_id, path, None);
        Ok(())
    }
}

pub struct FakeSettings {
    pub notify: bool,
    pub hide_windows_paths: bool,
}

impl Settings for FakeSettings {
    fn notifications_enabled(&self) -> bool {
        self.notify
    }

    fn hide_windows_incompatible_path_msg(&self) -> bool {
        self.hide_windows_paths
    }
}

/// Fakes wired together the way the binary wires the real collaborators.
pub struct Harness {
    pub rpc: Arc<FakeRpc>,
    pub tray: Arc<RecordingTray>,
    pub prompt: Arc<ScriptedPrompt>,
    pub links: Arc<RecordingLinks>,
    pub accounts: Arc<FakeAccounts>,
    pub settings: Arc<FakeSettings>,
    pub with_links: bool,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            rpc: Arc::new(FakeRpc::new()),
            tray: Arc::new(RecordingTray::default()),
            prompt: Arc::new(ScriptedPrompt::answering(true)),
            links: Arc::new(RecordingLinks::default()),
            accounts: Arc::new(
                FakeAccounts::default()
                    .with("d1", "https://cloud.example.com", "alice@example.com")
                    .with("broken", "", ""),
            ),
            settings: Arc::new(FakeSettings {
                notify: true,
                hide_windows_paths: false,
            }),
            with_links: true,
        }
    }

    pub fn prompt_answering(mut self, confirm: bool) -> Self {
        self.prompt = Arc::new(ScriptedPrompt::answering(confirm));
        self
    }

    pub fn settings(mut self, notify: bool, hide_windows_paths: bool) -> Self {
        self.settings = Arc::new(FakeSettings {
            notify,
            hide_windows_paths,
        });
        self
    }

    pub fn without_links(mut self) -> Self {
        self.with_links = false;
        self
    }

    pub fn collaborators(&self) -> Collaborators {
        let link_commands: Option<Arc<dyn LinkCommands>> = if self.with_links {
            Some(self.links.clone() as Arc<dyn LinkCommands>)
        } else {
            None
        };
        Collaborators {
            tray: self.tray.clone(),
            prompt: self.prompt.clone(),
            accounts: self.accounts.clone(),
            link_commands,
            settings: self.settings.clone(),
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.rpc.clone(), self.collaborators())
    }

    pub fn poller(&self) -> MessagePoller {
        MessagePoller::new(self.rpc.clone(), self.collaborators())
    }
}

//! Fixed-cadence polling of the sync daemon.

mod liveness;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::dispatch::{Collaborators, Dispatcher, EventMemo, PollerSignal};
use crate::events::{decode, PayloadKind};
use crate::rpc::RpcChannel;
use crate::types::PollerError;

pub use liveness::{LivenessState, PollerCommand};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Polls the daemon for drive events, notifications, the global sync status
/// and the error list, and dispatches what comes back.
pub struct MessagePoller {
    rpc: Arc<dyn RpcChannel>,
    dispatcher: Dispatcher,
    interval: Duration,
    memo: EventMemo,
}

impl MessagePoller {
    pub fn new(rpc: Arc<dyn RpcChannel>, collaborators: Collaborators) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&rpc), collaborators),
            rpc,
            interval: DEFAULT_POLL_INTERVAL,
            memo: EventMemo::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PollerSignal> {
        self.dispatcher.subscribe()
    }

    pub fn memo(&self) -> &EventMemo {
        &self.memo
    }

    /// Runs one tick: all four sequences in order, each independent of the
    /// others' failures.
    pub async fn poll_once(&mut self) {
        for kind in PayloadKind::ALL {
            self.run_sequence(kind).await;
        }
    }

    async fn run_sequence(&mut self, kind: PayloadKind) {
        if !self.rpc.is_connected().await {
            trace!(%kind, "RPC channel not connected, skipping");
            return;
        }

        let payload = match self.query(kind).await {
            Ok(payload) => payload,
            Err(err) => {
                if kind == PayloadKind::SyncErrors {
                    self.dispatcher.apply_sync_errors(Vec::new());
                }
                match err {
                    PollerError::EmptyReply(_) => trace!(%kind, "Nothing pending"),
                    err => debug!(%kind, error = %err, "Poll request failed"),
                }
                return;
            }
        };

        match decode(kind, &payload) {
            Ok(event) => self.dispatcher.dispatch(event, &mut self.memo).await,
            Err(err) => warn!(%kind, error = %err, "Failed to decode daemon reply"),
        }
    }

    async fn query(&self, kind: PayloadKind) -> Result<Value, PollerError> {
        match kind {
            PayloadKind::DriveEvents => self.rpc.get_seadrive_events().await,
            PayloadKind::Notification => self.rpc.get_sync_notification().await,
            PayloadKind::GlobalSyncStatus => self.rpc.get_global_sync_status().await,
            PayloadKind::SyncErrors => self.rpc.get_sync_errors().await,
        }
    }

    /// Spawns the poll loop. The first tick fires one interval from now.
    pub fn start(self) -> PollerHandle {
        let (commands, receiver) = mpsc::channel(8);
        let task = tokio::spawn(self.run(receiver));
        PollerHandle { commands, task }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<PollerCommand>) {
        let mut state = LivenessState::Running;
        let mut ticker = new_ticker(self.interval);

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("all poller handles dropped, stopping");
                        break;
                    };
                    let Some(next) = state.on_command(command) else {
                        debug!("message poller shutting down");
                        break;
                    };
                    if next.is_running() && !state.is_running() {
                        ticker = new_ticker(self.interval);
                    }
                    state = next;
                }
                _ = ticker.tick(), if state.is_running() => {
                    self.poll_once().await;
                }
            }
        }
    }
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Controls a poller started with [`MessagePoller::start`].
pub struct PollerHandle {
    commands: mpsc::Sender<PollerCommand>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop ticking until the daemon comes back.
    pub async fn daemon_dead(&self) {
        self.send(PollerCommand::DaemonDead).await;
    }

    /// Resume ticking at the configured interval.
    pub async fn daemon_restarted(&self) {
        self.send(PollerCommand::DaemonRestarted).await;
    }

    /// Stops the loop after any in-flight tick and waits for it to exit.
    pub async fn shutdown(self) {
        self.send(PollerCommand::Shutdown).await;
        if let Err(err) = self.task.await {
            warn!(error = %err, "message poller task failed");
        }
    }

    async fn send(&self, command: PollerCommand) {
        if self.commands.send(command).await.is_err() {
            debug!(?command, "message poller already stopped");
        }
    }
}

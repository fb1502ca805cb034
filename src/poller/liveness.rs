use tracing::{debug, info};

/// Commands delivered to a running poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerCommand {
    DaemonDead,
    DaemonRestarted,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessState {
    Running,
    Paused,
}

impl LivenessState {
    pub fn is_running(self) -> bool {
        self == LivenessState::Running
    }

    /// Next state for a daemon health signal. Returns `None` for commands
    /// that are not about liveness.
    pub fn on_command(self, command: PollerCommand) -> Option<LivenessState> {
        match command {
            PollerCommand::DaemonDead => {
                if self.is_running() {
                    debug!("pausing message poller when daemon is dead");
                }
                Some(LivenessState::Paused)
            }
            PollerCommand::DaemonRestarted => {
                if !self.is_running() {
                    info!("daemon restarted, resuming message poller");
                }
                Some(LivenessState::Running)
            }
            PollerCommand::Shutdown => None,
        }
    }
}

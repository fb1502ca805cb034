//! Headless collaborators used by the standalone binary: tray output goes to
//! the log and deletion prompts are asked on the terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tracing::{info, trace, warn};

use crate::collaborators::{ConfirmationPrompt, Severity, TrayMessage, TrayNotifier};
use crate::events::SyncError;

#[derive(Default)]
pub struct LoggingTray {
    syncing: AtomicBool,
    errors: Mutex<Vec<SyncError>>,
}

impl LoggingTray {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrayNotifier for LoggingTray {
    fn show_message(&self, message: TrayMessage) {
        match message.severity {
            Severity::Information => info!(
                title = %message.title,
                repo = message.repo_id.as_deref().unwrap_or(""),
                "{}",
                message.body
            ),
            Severity::Warning => warn!(
                title = %message.title,
                repo = message.repo_id.as_deref().unwrap_or(""),
                "{}",
                message.body
            ),
        }
    }

    fn show_warning_message(&self, title: &str, body: &str) {
        warn!(title = %title, "{}", body);
    }

    fn rotate(&self, active: bool) {
        if self.syncing.swap(active, Ordering::Relaxed) != active {
            info!(syncing = active, "Sync activity changed");
        }
    }

    fn set_transfer_rate(&self, sent_bytes: u64, recv_bytes: u64) {
        trace!(sent_bytes, recv_bytes, "Transfer rate");
    }

    fn set_sync_errors(&self, errors: Vec<SyncError>) {
        let mut current = self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if same_errors(&current, &errors) {
            *current = errors;
            return;
        }
        for error in &errors {
            warn!(
                repo = %error.repo_name,
                path = %error.path,
                when = %error.readable_time,
                "{}",
                error.error_str
            );
        }
        if errors.is_empty() {
            info!("No outstanding sync errors");
        }
        *current = errors;
    }
}

/// Errors are the same when they differ at most in their relative time label.
fn same_errors(current: &[SyncError], next: &[SyncError]) -> bool {
    current.len() == next.len()
        && current.iter().zip(next).all(|(a, b)| {
            a.id == b.id
                && a.repo_id == b.repo_id
                && a.path == b.path
                && a.error_id == b.error_id
                && a.timestamp == b.timestamp
        })
}

/// Asks `y/N` on stdin; anything but yes declines.
pub struct ConsolePrompt<R = BufReader<Stdin>> {
    input: tokio::sync::Mutex<R>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self::with_input(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ConsolePrompt<R> {
    /// Answers are read from `input`, which is kept across prompts.
    pub fn with_input(input: R) -> Self {
        Self {
            input: tokio::sync::Mutex::new(input),
        }
    }
}

#[async_trait]
impl<R> ConfirmationPrompt for ConsolePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm_deletion(&self, text: &str, info: &str) -> bool {
        let mut input = self.input.lock().await;
        let mut stdout = tokio::io::stdout();
        let question = if text.is_empty() {
            format!("{info} [y/N] ")
        } else {
            format!("{text}\n{info} [y/N] ")
        };
        if let Err(err) = stdout.write_all(question.as_bytes()).await {
            warn!(error = %err, "Failed to write confirmation prompt");
            return false;
        }
        let _ = stdout.flush().await;

        let mut line = String::new();
        match input.read_line(&mut line).await {
            Ok(0) => false,
            Ok(_) => is_affirmative(&line),
            Err(err) => {
                warn!(error = %err, "Failed to read confirmation answer");
                false
            }
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

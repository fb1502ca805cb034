use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use seadrive_notifier::surfaces::{ConsolePrompt, LoggingTray};
use seadrive_notifier::{
    Collaborators, Config, ConfiguredAccounts, HttpRpcClient, MessagePoller, PollerSignal,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().await;

    let rpc = match HttpRpcClient::from_config(&config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!(error = %err, "Failed to create RPC client");
            std::process::exit(1);
        }
    };

    let collaborators = Collaborators {
        tray: Arc::new(LoggingTray::new()),
        prompt: Arc::new(ConsolePrompt::new()),
        accounts: Arc::new(ConfiguredAccounts::from_config(&config)),
        link_commands: None,
        settings: Arc::new(config.clone()),
    };

    let poller = MessagePoller::new(rpc, collaborators).with_interval(config.poll_interval());
    let mut signals = poller.subscribe();
    tokio::spawn(async move {
        while let Ok(signal) = signals.recv().await {
            if signal == PollerSignal::FilesystemLoaded {
                info!("Drive filesystem loaded");
            }
        }
    });

    let handle = poller.start();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %config.rpc_url,
        "seadrive-notifier started"
    );

    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Failed to listen for Ctrl+C");
    }
    info!("Shutting down");
    handle.shutdown().await;
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use dsr_tracker::{
    ActionDispatcher, ConsoleEventHandler, DsrEventHandler, DsrTracker, EthRpcProvider,
    NotificationQueue, SavingsAction, TrackerConfig,
};

fn print_instructions() {
    info!("Use the commands below to add and retrieve Dai from DSR.");
    info!("Step 1: Approve Dai");
    info!("  {:<10} {}", SavingsAction::ApproveStable.command(), SavingsAction::ApproveStable.label());
    info!("Step 2: Interact with DSR");
    for action in [
        SavingsAction::JoinSavings,
        SavingsAction::ExitSavings,
        SavingsAction::ExitAllSavings,
    ] {
        info!("  {:<10} {}", action.command(), action.label());
    }
    info!("  {:<10} {}", "state", "Show the account card");
    info!("  {:<10} {}", "quit", "Stop the tracker");
}

/// Read commands from stdin until `quit`, EOF or shutdown
async fn command_loop(
    tracker: DsrTracker,
    dispatcher: ActionDispatcher,
    console: Arc<dyn DsrEventHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            line = lines.next_line() => line.context("Failed to read command")?,
        };

        let Some(line) = line else {
            info!("Input closed; tracking continues until Ctrl+C");
            shutdown.cancelled().await;
            return Ok(());
        };

        match line.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "help" => print_instructions(),
            "state" => console.on_state_update(&tracker.state().await).await,
            "quit" | "q" => {
                shutdown.cancel();
                return Ok(());
            }
            word => match word.parse::<SavingsAction>() {
                Ok(action) => {
                    dispatcher.spawn(action);
                }
                Err(e) => warn!("{} (type `help`)", e),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = TrackerConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(config.log_level)
        .with_file(true)
        .with_line_number(true)
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        info!("Initializing DSR tracker...");
        info!("RPC URL: {}", config.rpc_url);

        let provider = Arc::new(
            EthRpcProvider::connect(config.rpc_url.clone(), config.account, config.contracts)
                .await
                .context("Failed to connect to the chain node")?,
        );

        let console: Arc<dyn DsrEventHandler> = Arc::new(ConsoleEventHandler::new());
        let (queue, notifier) = NotificationQueue::new(console.clone());
        let queue = Arc::new(queue);

        let tracker = DsrTracker::new(provider.clone(), queue.clone());
        let dispatcher = ActionDispatcher::new(provider.clone(), provider, queue.clone());

        tracker.start().await;
        print_instructions();

        let shutdown = CancellationToken::new();

        let poll_interval = config.poll_interval;
        let tracker_for_task = tracker.clone();
        let tracker_shutdown = shutdown.clone();
        let tracking = tokio::spawn(async move {
            tracker_for_task.run(poll_interval, tracker_shutdown).await;
        });

        let commands = tokio::spawn(command_loop(
            tracker,
            dispatcher,
            console,
            shutdown.clone(),
        ));

        info!("DSR tracker is running. Press Ctrl+C to stop.");

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                info!("Shutting down...");
                shutdown.cancel();
            }
            _ = shutdown.cancelled() => {
                info!("Shutting down...");
            }
        }

        if let Err(e) = tracking.await {
            error!("Tracking task failed: {}", e);
        }
        match commands.await {
            Ok(Err(e)) => error!("Command loop failed: {:#}", e),
            Err(e) => error!("Command task failed: {}", e),
            Ok(Ok(())) => {}
        }

        queue.shutdown();
        notifier.await.ok();

        Ok::<(), anyhow::Error>(())
    });

    // A pending stdin read would otherwise keep the runtime alive
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

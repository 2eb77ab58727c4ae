use async_trait::async_trait;
use tracing::{error, info};

use crate::models::{action::ActionOutcome, display_state::DisplayState};
use crate::traits::event_handler::DsrEventHandler;
use crate::utils::helper::format_tx_hash;

/// Console logging event handler: renders the account card
pub struct ConsoleEventHandler;

impl ConsoleEventHandler {
    /// Create a new console event handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DsrEventHandler for ConsoleEventHandler {
    async fn on_state_update(&self, state: &DisplayState) {
        info!("{}", "-".repeat(60));
        for line in state.render_lines() {
            info!("{}", line);
        }
    }

    async fn on_action_result(&self, outcome: &ActionOutcome) {
        info!(
            "✅ {} submitted at {} (tx {})",
            outcome.action,
            outcome.submitted_at.format("%H:%M:%S"),
            format_tx_hash(&outcome.tx_hash)
        );
    }

    async fn handle_error(&self, error: &anyhow::Error) {
        error!("❌ {:#}", error);
    }
}

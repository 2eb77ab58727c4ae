use async_trait::async_trait;

use crate::models::{action::ActionOutcome, display_state::DisplayState};

/// Handler for tracker events
#[async_trait]
pub trait DsrEventHandler: Send + Sync {
    /// Called after every tick with the state to render
    async fn on_state_update(&self, state: &DisplayState);

    /// Called when a savings action was accepted by the chain service
    async fn on_action_result(&self, outcome: &ActionOutcome);

    /// Handle error - using reference to avoid cloning issues
    async fn handle_error(&self, error: &anyhow::Error);
}

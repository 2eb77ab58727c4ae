use std::sync::Arc;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::models::{
    action::{ActionOutcome, SavingsAction},
    token::one_unit,
};
use crate::traits::{
    approval::ProxyApproval, chain_service::SavingsChainService, event_handler::DsrEventHandler,
};

/// Forwards savings commands to the chain service and reports how they went
pub struct ActionDispatcher {
    chain: Arc<dyn SavingsChainService>,
    approval: Arc<dyn ProxyApproval>,
    event_handler: Arc<dyn DsrEventHandler>,
}

impl ActionDispatcher {
    pub fn new(
        chain: Arc<dyn SavingsChainService>,
        approval: Arc<dyn ProxyApproval>,
        event_handler: Arc<dyn DsrEventHandler>,
    ) -> Self {
        Self { chain, approval, event_handler }
    }

    /// Submit an action and wait for the chain service to accept it.
    ///
    /// Nothing in the display state changes here; the next poll shows the
    /// effect.
    pub async fn dispatch(&self, action: SavingsAction) -> anyhow::Result<ActionOutcome> {
        info!("Submitting: {}", action);

        let tx_hash = match action {
            SavingsAction::ApproveStable => self.approval.approve_savings_transfer().await,
            SavingsAction::JoinSavings => self.chain.join_savings(one_unit()).await,
            SavingsAction::ExitSavings => self.chain.exit_savings(one_unit()).await,
            SavingsAction::ExitAllSavings => self.chain.exit_all_savings().await,
        }
        .with_context(|| format!("{} failed", action))?;

        Ok(ActionOutcome::new(action, tx_hash))
    }

    /// Dispatch and report the result to the event handler
    pub async fn dispatch_and_report(&self, action: SavingsAction) {
        match self.dispatch(action).await {
            Ok(outcome) => {
                info!("{} submitted: {}", action, outcome.tx_hash);
                self.event_handler.on_action_result(&outcome).await;
            }
            Err(e) => {
                error!("{:#}", e);
                self.event_handler.handle_error(&e).await;
            }
        }
    }

    /// Fire-and-forget: run the action on its own task.
    ///
    /// Repeated calls are neither merged nor ordered.
    pub fn spawn(&self, action: SavingsAction) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            dispatcher.dispatch_and_report(action).await;
        })
    }
}

impl Clone for ActionDispatcher {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            approval: self.approval.clone(),
            event_handler: self.event_handler.clone(),
        }
    }
}

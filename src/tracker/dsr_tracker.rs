use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::models::{
    display_state::{BalanceSnapshot, DisplayState, StateUpdate},
    token::Token,
};
use crate::traits::{chain_service::SavingsChainService, event_handler::DsrEventHandler};

/// Polls savings balances and keeps the accrual estimate moving between polls
pub struct DsrTracker {
    account: Address,
    chain: Arc<dyn SavingsChainService>,
    event_handler: Arc<dyn DsrEventHandler>,
    state: Arc<Mutex<DisplayState>>,
}

impl DsrTracker {
    /// Create a new tracker for the chain service's current account
    pub fn new(chain: Arc<dyn SavingsChainService>, event_handler: Arc<dyn DsrEventHandler>) -> Self {
        let account = chain.current_address();
        Self {
            account,
            chain,
            event_handler,
            state: Arc::new(Mutex::new(DisplayState::new(account))),
        }
    }

    /// Get tracked account
    pub fn account(&self) -> &Address {
        &self.account
    }

    /// Copy of the current display state
    pub async fn state(&self) -> DisplayState {
        self.state.lock().await.clone()
    }

    /// Fetch ETH, DAI and savings balances; fails if any of the three fails
    pub async fn fetch_balances(&self) -> anyhow::Result<BalanceSnapshot> {
        let (eth, dai, dsr) = tokio::try_join!(
            self.chain.get_balance(Token::Eth, &self.account),
            self.chain.get_balance(Token::Dai, &self.account),
            self.chain.get_savings_balance(&self.account),
        )?;
        Ok(BalanceSnapshot { eth, dai, dsr })
    }

    /// Single poll. Returns whether the balances were replaced.
    pub async fn poll_once(&self) -> bool {
        match self.fetch_balances().await {
            Ok(snapshot) => {
                self.state.lock().await.apply(StateUpdate::Balances(snapshot));
                true
            }
            Err(e) => {
                warn!("Balance poll skipped: {:#}", e);
                false
            }
        }
    }

    /// Fetch the yearly savings rate and store it
    pub async fn load_yearly_rate(&self) -> anyhow::Result<f64> {
        let apr = self.chain.get_savings_yearly_rate().await?;
        self.state.lock().await.apply(StateUpdate::YearlyRate(apr));
        info!("Savings rate: {:.4}%", apr * 100.0);
        Ok(apr)
    }

    /// Poll then estimate under one lock, then publish the result
    pub async fn tick(&self) -> DisplayState {
        let fetched = self.fetch_balances().await;

        let snapshot = {
            let mut state = self.state.lock().await;
            match fetched {
                Ok(balances) => state.apply(StateUpdate::Balances(balances)),
                Err(e) => warn!("Balance poll skipped: {:#}", e),
            }
            state.apply(StateUpdate::Accrual);
            state.clone()
        };

        debug!(
            "tick {}: dsr {} estimated {}",
            snapshot.elapsed_ticks, snapshot.dsr_balance, snapshot.estimated_total
        );
        self.event_handler.on_state_update(&snapshot).await;
        snapshot
    }

    /// Startup: one poll, then the yearly rate
    pub async fn start(&self) {
        info!("Tracking savings for {}", self.account);

        self.poll_once().await;

        if let Err(e) = self.load_yearly_rate().await {
            warn!("Savings rate unavailable, estimating at 0%: {:#}", e);
        }

        let state = self.state().await;
        self.event_handler.on_state_update(&state).await;
    }

    /// Run ticks every `interval` until `shutdown` is cancelled
    pub async fn run(&self, interval: Duration, shutdown: CancellationToken) {
        info!("Starting polling-based tracking with interval: {}ms", interval.as_millis());

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately and start() already polled
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Tracker stopped");
                    return;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }
    }
}

// Implement Clone for DsrTracker
impl Clone for DsrTracker {
    fn clone(&self) -> Self {
        Self {
            account: self.account,
            chain: self.chain.clone(),
            event_handler: self.event_handler.clone(),
            state: self.state.clone(),
        }
    }
}

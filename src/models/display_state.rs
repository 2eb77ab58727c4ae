use alloy_primitives::Address;
use chrono::{DateTime, Utc};

use super::token::{format_eth, Token};
use crate::accrual;

/// Balances read from the chain in one poll
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BalanceSnapshot {
    pub eth: f64,
    pub dai: f64,
    pub dsr: f64,
}

/// A single mutation of the display state
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// Replace all three balances together
    Balances(BalanceSnapshot),
    /// Store the yearly savings rate fetched at startup
    YearlyRate(f64),
    /// Advance the accrual estimate by one tick
    Accrual,
}

/// Everything the savings screen shows
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub account: Address,
    pub eth_balance: String,
    pub dai_balance: f64,
    pub dsr_balance: f64,
    pub apr: f64,
    pub elapsed_ticks: u64,
    pub estimated_total: f64,
    pub last_poll: Option<DateTime<Utc>>,
}

impl DisplayState {
    /// Create the initial state for an account
    pub fn new(account: Address) -> Self {
        Self {
            account,
            eth_balance: format_eth(0.0),
            dai_balance: 0.0,
            dsr_balance: 0.0,
            apr: 0.0,
            elapsed_ticks: 1,
            estimated_total: 0.0,
            last_poll: None,
        }
    }

    /// Apply an update. This is the only place the state changes.
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Balances(snapshot) => {
                self.eth_balance = format_eth(snapshot.eth);
                self.dai_balance = snapshot.dai;
                self.dsr_balance = snapshot.dsr;
                self.last_poll = Some(Utc::now());
            }
            StateUpdate::YearlyRate(apr) => {
                self.apr = apr;
            }
            StateUpdate::Accrual => {
                let total = accrual::estimate_total(self.dsr_balance, self.apr, self.elapsed_ticks);
                if total == 0.0 {
                    self.estimated_total = 0.0;
                } else {
                    self.elapsed_ticks += 1;
                    self.estimated_total = total;
                }
            }
        }
    }

    /// Savings rate as a percentage (`apr * 100`), not the raw fraction
    pub fn apr_percent(&self) -> f64 {
        self.apr * 100.0
    }

    /// Lines of the account card
    pub fn render_lines(&self) -> Vec<String> {
        let dai = Token::Dai.symbol();
        vec![
            "Account Info:".to_string(),
            self.account.to_string(),
            self.eth_balance.clone(),
            format!("{} {}", self.dai_balance, dai),
            format!("{} {} in DSR", self.estimated_total, dai),
            format!("{:.2} % Savings Rate", self.apr_percent()),
            self.last_poll_line(),
        ]
    }

    fn last_poll_line(&self) -> String {
        match self.last_poll {
            Some(at) => format!("Last poll: {} UTC", at.format("%H:%M:%S")),
            None => "Last poll: never".to_string(),
        }
    }
}

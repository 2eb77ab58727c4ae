//! Shared test doubles: an in-memory chain service and a recording handler.
#![allow(dead_code)]

use std::sync::Mutex;

use alloy_primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;

use dsr_tracker::{
    ActionOutcome, DisplayState, DsrEventHandler, ProxyApproval, SavingsChainService, Token,
};

pub const ACCOUNT: Address = address!("4242424242424242424242424242424242424242");

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Approve,
    Join(U256),
    Exit(U256),
    ExitAll,
}

#[derive(Debug, Default)]
struct Ledger {
    eth: f64,
    dai: f64,
    dsr: f64,
    apr: f64,
    fail_savings_balance: bool,
    fail_rate: bool,
    fail_actions: bool,
    balance_queries: u32,
    rate_queries: u32,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct MockChain {
    ledger: Mutex<Ledger>,
}

impl MockChain {
    pub fn new(eth: f64, dai: f64, dsr: f64, apr: f64) -> Self {
        Self {
            ledger: Mutex::new(Ledger { eth, dai, dsr, apr, ..Default::default() }),
        }
    }

    pub fn set_balances(&self, eth: f64, dai: f64, dsr: f64) {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.eth = eth;
        ledger.dai = dai;
        ledger.dsr = dsr;
    }

    pub fn set_apr(&self, apr: f64) {
        self.ledger.lock().unwrap().apr = apr;
    }

    pub fn fail_savings_balance(&self, fail: bool) {
        self.ledger.lock().unwrap().fail_savings_balance = fail;
    }

    pub fn fail_rate(&self, fail: bool) {
        self.ledger.lock().unwrap().fail_rate = fail;
    }

    pub fn fail_actions(&self, fail: bool) {
        self.ledger.lock().unwrap().fail_actions = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.ledger.lock().unwrap().calls.clone()
    }

    pub fn rate_queries(&self) -> u32 {
        self.ledger.lock().unwrap().rate_queries
    }

    pub fn balance_queries(&self) -> u32 {
        self.ledger.lock().unwrap().balance_queries
    }

    fn record(&self, call: Call) -> anyhow::Result<TxHash> {
        let mut ledger = self.ledger.lock().unwrap();
        if ledger.fail_actions {
            anyhow::bail!("transaction rejected");
        }
        ledger.calls.push(call);
        Ok(TxHash::with_last_byte(ledger.calls.len() as u8))
    }
}

#[async_trait]
impl SavingsChainService for MockChain {
    fn current_address(&self) -> Address {
        ACCOUNT
    }

    async fn get_balance(&self, token: Token, address: &Address) -> anyhow::Result<f64> {
        assert_eq!(*address, ACCOUNT);
        let mut ledger = self.ledger.lock().unwrap();
        ledger.balance_queries += 1;
        Ok(match token {
            Token::Eth => ledger.eth,
            Token::Dai => ledger.dai,
        })
    }

    async fn get_savings_balance(&self, address: &Address) -> anyhow::Result<f64> {
        assert_eq!(*address, ACCOUNT);
        let mut ledger = self.ledger.lock().unwrap();
        ledger.balance_queries += 1;
        if ledger.fail_savings_balance {
            anyhow::bail!("network error");
        }
        Ok(ledger.dsr)
    }

    async fn get_savings_yearly_rate(&self) -> anyhow::Result<f64> {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.rate_queries += 1;
        if ledger.fail_rate {
            anyhow::bail!("rate unavailable");
        }
        Ok(ledger.apr)
    }

    async fn join_savings(&self, amount: U256) -> anyhow::Result<TxHash> {
        self.record(Call::Join(amount))
    }

    async fn exit_savings(&self, amount: U256) -> anyhow::Result<TxHash> {
        self.record(Call::Exit(amount))
    }

    async fn exit_all_savings(&self) -> anyhow::Result<TxHash> {
        self.record(Call::ExitAll)
    }
}

#[async_trait]
impl ProxyApproval for MockChain {
    async fn approve_savings_transfer(&self) -> anyhow::Result<TxHash> {
        self.record(Call::Approve)
    }
}

#[derive(Default)]
pub struct RecordingHandler {
    pub states: Mutex<Vec<DisplayState>>,
    pub outcomes: Mutex<Vec<ActionOutcome>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub fn states(&self) -> Vec<DisplayState> {
        self.states.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<ActionOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl DsrEventHandler for RecordingHandler {
    async fn on_state_update(&self, state: &DisplayState) {
        self.states.lock().unwrap().push(state.clone());
    }

    async fn on_action_result(&self, outcome: &ActionOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }

    async fn handle_error(&self, error: &anyhow::Error) {
        self.errors.lock().unwrap().push(format!("{:#}", error));
    }
}

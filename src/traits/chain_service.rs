use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::models::token::Token;

/// Chain-side savings service the tracker reads from and submits to
#[async_trait]
pub trait SavingsChainService: Send + Sync {
    /// Account the screen is connected to
    fn current_address(&self) -> Address;

    /// Fetch a token balance in whole-token units
    async fn get_balance(&self, token: Token, address: &Address) -> anyhow::Result<f64>;

    /// Fetch the balance deposited in the savings module
    async fn get_savings_balance(&self, address: &Address) -> anyhow::Result<f64>;

    /// Fetch the yearly savings rate as a fraction (0.02 for 2%)
    async fn get_savings_yearly_rate(&self) -> anyhow::Result<f64>;

    /// Deposit `amount` wad into the savings module
    async fn join_savings(&self, amount: U256) -> anyhow::Result<TxHash>;

    /// Withdraw `amount` wad from the savings module
    async fn exit_savings(&self, amount: U256) -> anyhow::Result<TxHash>;

    /// Withdraw the whole savings balance
    async fn exit_all_savings(&self) -> anyhow::Result<TxHash>;
}

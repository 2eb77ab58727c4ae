use alloy_primitives::TxHash;
use async_trait::async_trait;

/// Authorizes the savings module to move the account's stable token
#[async_trait]
pub trait ProxyApproval: Send + Sync {
    async fn approve_savings_transfer(&self) -> anyhow::Result<TxHash>;
}

use std::sync::Arc;

use alloy_primitives::{Address, TxHash, U256};
use alloy_sol_types::SolCall;
use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::ContractAddresses;
use crate::models::token::{wad_to_f64, Token, WAD_DECIMALS};
use crate::providers::contracts::{IDsrManager, IPot, IERC20};
use crate::providers::rpc_client::JsonRpcClient;
use crate::traits::{approval::ProxyApproval, chain_service::SavingsChainService};

/// Decimals of a ray (Pot rate accumulator)
pub const RAY_DECIMALS: u32 = 27;

pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// 10^27
pub fn ray() -> U256 {
    U256::from(1_000_000_000_000_000_000_000_000_000u128)
}

/// Yearly rate from the Pot's per-second ray rate
pub fn yearly_rate_from_dsr(dsr: U256) -> f64 {
    let per_second = wad_to_f64(dsr.saturating_sub(ray()), RAY_DECIMALS);
    (SECONDS_PER_YEAR * per_second.ln_1p()).exp_m1()
}

/// JSON-RPC backed savings service (polling approach)
pub struct EthRpcProvider {
    rpc_client: Arc<JsonRpcClient>,
    account: Address,
    contracts: ContractAddresses,
}

impl EthRpcProvider {
    /// Create a provider, asking the node for its first account when none is given
    pub async fn connect(
        rpc_url: String,
        account: Option<Address>,
        contracts: ContractAddresses,
    ) -> anyhow::Result<Self> {
        let rpc_client = Arc::new(JsonRpcClient::new(rpc_url));

        let account = match account {
            Some(account) => account,
            None => {
                let accounts = rpc_client
                    .accounts()
                    .await
                    .context("Failed to query node accounts")?;
                *accounts
                    .first()
                    .ok_or_else(|| anyhow::anyhow!("Node at {} exposes no accounts", rpc_client.url()))?
            }
        };

        info!("Connected to {} as {}", rpc_client.url(), account);

        Ok(Self { rpc_client, account, contracts })
    }

    async fn send(&self, to: &Address, data: Vec<u8>) -> anyhow::Result<TxHash> {
        let hash = self.rpc_client.send_transaction(&self.account, to, &data).await?;
        debug!("Submitted transaction {} to {}", hash, to);
        Ok(hash)
    }
}

#[async_trait]
impl SavingsChainService for EthRpcProvider {
    fn current_address(&self) -> Address {
        self.account
    }

    async fn get_balance(&self, token: Token, address: &Address) -> anyhow::Result<f64> {
        let raw = match token {
            Token::Eth => self.rpc_client.get_balance(address).await?,
            Token::Dai => {
                let data = IERC20::balanceOfCall { owner: *address }.abi_encode();
                self.rpc_client.call_uint(&self.contracts.dai, &data).await?
            }
        };
        Ok(wad_to_f64(raw, token.decimals()))
    }

    async fn get_savings_balance(&self, address: &Address) -> anyhow::Result<f64> {
        let data = IDsrManager::daiBalanceCall { usr: *address }.abi_encode();
        let wad = self.rpc_client.call_uint(&self.contracts.dsr_manager, &data).await?;
        Ok(wad_to_f64(wad, WAD_DECIMALS))
    }

    async fn get_savings_yearly_rate(&self) -> anyhow::Result<f64> {
        let data = IPot::dsrCall {}.abi_encode();
        let dsr = self.rpc_client.call_uint(&self.contracts.pot, &data).await?;
        Ok(yearly_rate_from_dsr(dsr))
    }

    async fn join_savings(&self, amount: U256) -> anyhow::Result<TxHash> {
        let data = IDsrManager::joinCall { dst: self.account, wad: amount }.abi_encode();
        self.send(&self.contracts.dsr_manager, data).await
    }

    async fn exit_savings(&self, amount: U256) -> anyhow::Result<TxHash> {
        let data = IDsrManager::exitCall { dst: self.account, wad: amount }.abi_encode();
        self.send(&self.contracts.dsr_manager, data).await
    }

    async fn exit_all_savings(&self) -> anyhow::Result<TxHash> {
        let data = IDsrManager::exitAllCall { dst: self.account }.abi_encode();
        self.send(&self.contracts.dsr_manager, data).await
    }
}

#[async_trait]
impl ProxyApproval for EthRpcProvider {
    async fn approve_savings_transfer(&self) -> anyhow::Result<TxHash> {
        let data = IERC20::approveCall {
            spender: self.contracts.dsr_manager,
            amount: U256::MAX,
        }
        .abi_encode();
        self.send(&self.contracts.dai, data).await
    }
}

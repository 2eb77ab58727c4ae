//! Environment driven configuration.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file by the binary) and fall back to a local dev node and the
//! mainnet Maker deployment.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{address, Address};
use anyhow::{bail, Context, Result};
use tracing::level_filters::LevelFilter;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

pub const MAINNET_DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
pub const MAINNET_DSR_MANAGER: Address = address!("373238337Bfe1146fb49989fc222523f83081dDb");
pub const MAINNET_POT: Address = address!("197E90f9FAD81970bA7976f33CbD77088E5D7cf7");

/// Addresses of the contracts behind the savings service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub dai: Address,
    pub dsr_manager: Address,
    pub pot: Address,
}

impl ContractAddresses {
    pub fn mainnet() -> Self {
        Self {
            dai: MAINNET_DAI,
            dsr_manager: MAINNET_DSR_MANAGER,
            pot: MAINNET_POT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub rpc_url: String,
    /// Account to track; the node's first account when unset
    pub account: Option<Address>,
    pub poll_interval: Duration,
    pub contracts: ContractAddresses,
    pub log_level: LevelFilter,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            account: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            contracts: ContractAddresses::mainnet(),
            log_level: LevelFilter::INFO,
        }
    }
}

impl TrackerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rpc_url = get("DSR_RPC_URL").unwrap_or(defaults.rpc_url);

        let account = get("DSR_ACCOUNT")
            .map(|raw| parse_address("DSR_ACCOUNT", &raw))
            .transpose()?;

        let poll_interval = match get("DSR_POLL_INTERVAL_MS") {
            Some(raw) => {
                let ms: u64 = raw
                    .parse()
                    .with_context(|| format!("DSR_POLL_INTERVAL_MS is not a number: {}", raw))?;
                if ms == 0 {
                    bail!("DSR_POLL_INTERVAL_MS must be greater than zero");
                }
                Duration::from_millis(ms)
            }
            None => defaults.poll_interval,
        };

        let contracts = ContractAddresses {
            dai: address_or("DSR_DAI_ADDRESS", get("DSR_DAI_ADDRESS"), defaults.contracts.dai)?,
            dsr_manager: address_or(
                "DSR_MANAGER_ADDRESS",
                get("DSR_MANAGER_ADDRESS"),
                defaults.contracts.dsr_manager,
            )?,
            pot: address_or("DSR_POT_ADDRESS", get("DSR_POT_ADDRESS"), defaults.contracts.pot)?,
        };

        let log_level = match get("DSR_LOG_LEVEL") {
            Some(raw) => LevelFilter::from_str(&raw)
                .map_err(|_| anyhow::anyhow!("DSR_LOG_LEVEL is not a log level: {}", raw))?,
            None => defaults.log_level,
        };

        Ok(Self {
            rpc_url,
            account,
            poll_interval,
            contracts,
            log_level,
        })
    }
}

fn parse_address(key: &str, raw: &str) -> Result<Address> {
    Address::from_str(raw).map_err(|e| anyhow::anyhow!("{} is not a valid address {}: {}", key, raw, e))
}

fn address_or(key: &str, raw: Option<String>, fallback: Address) -> Result<Address> {
    match raw {
        Some(raw) => parse_address(key, &raw),
        None => Ok(fallback),
    }
}

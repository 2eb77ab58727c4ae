//! Chain-service providers for the savings tracker

pub mod contracts;
pub mod rpc_client;
pub mod rpc_provider;

// Re-export for convenience
pub use rpc_client::{JsonRpcClient, RpcError};
pub use rpc_provider::EthRpcProvider;

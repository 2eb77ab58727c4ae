//! DSR Tracker Library
//!
//! Reads Dai Savings Rate balances for one account, smooths the displayed
//! savings balance between polls with a local compounding estimate, and
//! forwards join/exit commands to the savings contracts.

// Public modules - these are the API surface
pub mod accrual;
pub mod config;
pub mod models;
pub mod traits;
pub mod providers;
pub mod handlers;
pub mod notifications;
pub mod tracker;
pub mod utils;

// Re-export commonly used items for easier access
pub use config::{ContractAddresses, TrackerConfig};
pub use models::{
    action::{ActionOutcome, SavingsAction},
    display_state::{BalanceSnapshot, DisplayState, StateUpdate},
    token::Token,
};
pub use traits::{
    approval::ProxyApproval,
    chain_service::SavingsChainService,
    event_handler::DsrEventHandler,
};
pub use providers::rpc_provider::EthRpcProvider;
pub use handlers::console::ConsoleEventHandler;
pub use notifications::NotificationQueue;
pub use tracker::{dispatcher::ActionDispatcher, dsr_tracker::DsrTracker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Core traits for the savings tracker

pub mod chain_service;
pub mod approval;
pub mod event_handler;

// Re-export for convenience
pub use chain_service::SavingsChainService;
pub use approval::ProxyApproval;
pub use event_handler::DsrEventHandler;

//! Savings tracking: the polling loop and the action dispatcher

pub mod dsr_tracker;
pub mod dispatcher;

// Re-export for convenience
pub use dsr_tracker::DsrTracker;
pub use dispatcher::ActionDispatcher;

//! Data models for the savings tracker

pub mod token;
pub mod display_state;
pub mod action;

// Re-export for convenience
pub use token::Token;
pub use display_state::{BalanceSnapshot, DisplayState, StateUpdate};
pub use action::{ActionOutcome, SavingsAction};

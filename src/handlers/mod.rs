//! Event handlers for tracker updates

pub mod console;

// Re-export for convenience
pub use console::ConsoleEventHandler;

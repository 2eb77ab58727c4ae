pub mod helper;

pub use helper::format_tx_hash;

use alloy_primitives::TxHash;

/// Format a transaction hash for display (truncated)
pub fn format_tx_hash(hash: &TxHash) -> String {
    let s = hash.to_string();
    format!("{}...{}", &s[..10], &s[s.len() - 8..])
}

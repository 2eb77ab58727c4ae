use std::fmt;

use alloy_primitives::U256;

/// Decimals shared by ETH and DAI
pub const WAD_DECIMALS: u32 = 18;

/// Tokens the savings screen reads balances for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Native chain token
    Eth,
    /// Stable token managed by the savings module
    Dai,
}

impl Token {
    /// Ticker symbol used in logs and the rendered screen
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Eth => "ETH",
            Token::Dai => "DAI",
        }
    }

    pub fn decimals(&self) -> u32 {
        WAD_DECIMALS
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One whole token expressed in wad (10^18)
pub fn one_unit() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

/// Convert a raw integer amount into a display float
pub fn wad_to_f64(amount: U256, decimals: u32) -> f64 {
    // Display is plain base-10, so the float parse never sees an exponent
    let raw: f64 = amount.to_string().parse().unwrap_or(f64::MAX);
    raw / 10f64.powi(decimals as i32)
}

/// Format a native balance the way the screen shows it
pub fn format_eth(amount: f64) -> String {
    format!("{:.2} {}", amount, Token::Eth.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_unit_is_ten_to_the_eighteen() {
        assert_eq!(one_unit().to_string(), "1000000000000000000");
    }

    #[test]
    fn wad_conversion() {
        assert_eq!(wad_to_f64(one_unit(), WAD_DECIMALS), 1.0);
        assert_eq!(wad_to_f64(U256::ZERO, WAD_DECIMALS), 0.0);
        let half = U256::from(500_000_000_000_000_000u128);
        assert!((wad_to_f64(half, WAD_DECIMALS) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn eth_display_string() {
        assert_eq!(format_eth(0.0), "0.00 ETH");
        assert_eq!(format_eth(1.23456), "1.23 ETH");
    }
}

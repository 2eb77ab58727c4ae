use std::fmt;
use std::str::FromStr;

use alloy_primitives::TxHash;
use chrono::{DateTime, Utc};

/// User commands forwarded to the savings module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavingsAction {
    /// Let the savings module move the account's DAI
    ApproveStable,
    /// Deposit one DAI
    JoinSavings,
    /// Withdraw one DAI
    ExitSavings,
    /// Withdraw the whole savings balance
    ExitAllSavings,
}

impl SavingsAction {
    pub const ALL: [SavingsAction; 4] = [
        SavingsAction::ApproveStable,
        SavingsAction::JoinSavings,
        SavingsAction::ExitSavings,
        SavingsAction::ExitAllSavings,
    ];

    /// Command word accepted on the command line
    pub fn command(&self) -> &'static str {
        match self {
            SavingsAction::ApproveStable => "approve",
            SavingsAction::JoinSavings => "join",
            SavingsAction::ExitSavings => "exit",
            SavingsAction::ExitAllSavings => "exit-all",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            SavingsAction::ApproveStable => "Approve Dai",
            SavingsAction::JoinSavings => "Join 1 Dai to DSR",
            SavingsAction::ExitSavings => "Retrieve 1 Dai from DSR",
            SavingsAction::ExitAllSavings => "Retrieve all Dai from DSR",
        }
    }
}

impl fmt::Display for SavingsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SavingsAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim().to_ascii_lowercase();
        SavingsAction::ALL
            .into_iter()
            .find(|action| action.command() == word)
            .ok_or_else(|| anyhow::anyhow!("Unknown savings command: {}", s.trim()))
    }
}

/// Result of a submitted savings action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub action: SavingsAction,
    pub tx_hash: TxHash,
    pub submitted_at: DateTime<Utc>,
}

impl ActionOutcome {
    pub fn new(action: SavingsAction, tx_hash: TxHash) -> Self {
        Self {
            action,
            tx_hash,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_words() {
        assert_eq!("approve".parse::<SavingsAction>().unwrap(), SavingsAction::ApproveStable);
        assert_eq!(" JOIN ".parse::<SavingsAction>().unwrap(), SavingsAction::JoinSavings);
        assert_eq!("exit".parse::<SavingsAction>().unwrap(), SavingsAction::ExitSavings);
        assert_eq!("Exit-All".parse::<SavingsAction>().unwrap(), SavingsAction::ExitAllSavings);
    }

    #[test]
    fn rejects_unknown_words() {
        assert!("withdraw".parse::<SavingsAction>().is_err());
        assert!("".parse::<SavingsAction>().is_err());
    }

    #[test]
    fn command_words_are_unique() {
        for a in SavingsAction::ALL {
            for b in SavingsAction::ALL {
                if a != b {
                    assert_ne!(a.command(), b.command());
                }
            }
        }
    }
}

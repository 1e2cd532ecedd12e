//! Balance snapshots used to gate publication.

use serde::Serialize;

/// Result of a single balance check. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceSnapshot {
    /// Balance in native units; `0.0` when the query failed.
    pub balance: f64,
    /// True when the balance is below the minimum or could not be read.
    pub is_balance_low: bool,
}

impl BalanceSnapshot {
    /// Compare a queried balance against the configured minimum.
    pub fn from_balance(balance: f64, min_balance: f64) -> Self {
        Self {
            balance,
            is_balance_low: balance < min_balance,
        }
    }

    /// Conservative result used when the balance could not be read.
    pub fn unknown() -> Self {
        Self {
            balance: 0.0,
            is_balance_low: true,
        }
    }
}

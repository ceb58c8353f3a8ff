use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ChainError, Result};

/// A single value transfer recorded in the ledger.
///
/// Immutable once constructed: fields are only reachable through the
/// read accessors below. Identities are opaque strings, amounts are
/// plain quantities with no balance model behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) sender: String,
    pub(crate) recipient: String,
    pub(crate) amount: f64,
    pub(crate) timestamp: i64, // Unix millis (UTC)
}

impl Transaction {
    /// Build a transaction stamped with the current time.
    /// NaN and infinite amounts are rejected at construction.
    pub fn new(sender: &str, recipient: &str, amount: f64) -> Result<Self> {
        if !amount.is_finite() {
            return Err(ChainError::InvalidAmount(amount));
        }
        Ok(Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    /// Canonical view consumed by block hashing. `serde_json` objects are
    /// backed by a `BTreeMap`, so the keys serialize sorted and the encoding
    /// is a pure function of the four field values.
    pub fn canonical(&self) -> Value {
        json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "amount": self.amount,
            "timestamp": self.timestamp,
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;
    use crate::error::ChainError;

    #[test]
    fn new_stamps_current_time() {
        let tx = Transaction::new("alice", "bob", 100.0).unwrap();
        assert_eq!(tx.sender(), "alice");
        assert_eq!(tx.recipient(), "bob");
        assert_eq!(tx.amount(), 100.0);
        assert!(tx.timestamp() > 0);
    }

    #[test]
    fn rejects_non_finite_amounts() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Transaction::new("alice", "bob", bad).unwrap_err();
            assert!(matches!(err, ChainError::InvalidAmount(_)));
        }
    }

    #[test]
    fn negative_amounts_are_accepted() {
        // The ledger records transfers, it does not police them.
        let tx = Transaction::new("alice", "bob", -5.0).unwrap();
        assert_eq!(tx.amount(), -5.0);
    }

    #[test]
    fn canonical_view_is_key_sorted() {
        let tx = Transaction::new("alice", "bob", 100.0).unwrap();
        let expected = format!(
            r#"{{"amount":100.0,"recipient":"bob","sender":"alice","timestamp":{}}}"#,
            tx.timestamp()
        );
        assert_eq!(tx.canonical().to_string(), expected);
    }

    #[test]
    fn canonical_view_is_deterministic() {
        let tx = Transaction::new("alice", "bob", 42.5).unwrap();
        assert_eq!(tx.canonical(), tx.canonical());
    }
}

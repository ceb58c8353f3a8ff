use thiserror::Error;

/// Errors surfaced by the ledger's fallible operations.
///
/// Validation findings are not errors: a tampered chain makes
/// `Blockchain::is_valid_chain` return `false` with a `Violation` report,
/// it does not raise anything here.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("transaction amount must be finite, got {0}")]
    InvalidAmount(f64),
    #[error("chain has no blocks yet")]
    EmptyChain,
    #[error("mining cancelled before a qualifying nonce was found")]
    MiningCancelled,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

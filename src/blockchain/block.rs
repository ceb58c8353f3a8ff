use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::{ChainError, Result};
use crate::transaction::Transaction;

/// A single block in the ledger holding an ordered batch of transactions.
///
/// Fields are crate-private: once a block is mined and appended, external
/// callers can only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub(crate) index: u64,
    pub(crate) timestamp: i64, // Unix millis (UTC)
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) previous_hash: String,
    pub(crate) nonce: u64,   // Proof-of-Work counter
    pub(crate) hash: String, // Cached digest of the block
}

impl Block {
    /// Create a new block (not mined yet). Call `mine()` to perform PoW.
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: String) -> Self {
        let mut block = Self {
            index,
            timestamp: Utc::now().timestamp_millis(),
            transactions,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute the SHA-256 digest of this block from its fields (excluding
    /// the cached `hash` itself). The preimage is the canonical JSON of the
    /// content; object keys come out sorted, so the digest never depends on
    /// attribute insertion order.
    pub fn compute_hash(&self) -> String {
        let txs: Vec<_> = self.transactions.iter().map(Transaction::canonical).collect();
        let content = json!({
            "index": self.index,
            "timestamp": self.timestamp,
            "transactions": txs,
            "previous_hash": self.previous_hash,
            "nonce": self.nonce,
        });
        let mut hasher = Sha256::new();
        hasher.update(content.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Perform Proof-of-Work by finding a nonce that yields a hash starting
    /// with `difficulty` leading zeros (in hex). The search has no attempt
    /// bound; the winning nonce is reported on the log.
    pub fn mine(&mut self, difficulty: u32) {
        self.mine_with_cancel(difficulty, &AtomicBool::new(false))
            .expect("mining without a cancel signal always terminates");
    }

    /// Same search as `mine`, aborting with `ChainError::MiningCancelled`
    /// once `cancel` is raised. The block keeps its last attempted nonce in
    /// that case and stays unmined.
    pub fn mine_with_cancel(&mut self, difficulty: u32, cancel: &AtomicBool) -> Result<()> {
        let target_prefix = "0".repeat(difficulty as usize);
        loop {
            if cancel.load(Ordering::Relaxed) {
                return Err(ChainError::MiningCancelled);
            }
            self.hash = self.compute_hash();
            if self.hash.starts_with(&target_prefix) {
                break;
            }
            self.nonce = self.nonce.wrapping_add(1);
        }
        info!(
            "MINER - block #{} mined (nonce={}, hash={})",
            self.index, self.nonce, self.hash
        );
        Ok(())
    }

    /// Check that the cached hash carries the required leading-zero prefix.
    /// (Does NOT recompute the hash or validate chain linkage.)
    pub fn satisfies_difficulty(&self, difficulty: u32) -> bool {
        self.hash
            .chars()
            .take(difficulty as usize)
            .all(|c| c == '0')
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

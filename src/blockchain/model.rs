use std::fmt;
use std::sync::atomic::AtomicBool;

use log::{debug, info, warn};

use super::{Block, DEFAULT_DIFFICULTY, HASH_HEX_LEN, MINING_REWARD, NETWORK_IDENTITY};
use crate::error::{ChainError, Result};
use crate::transaction::Transaction;

/// Tunable chain parameters. The defaults reproduce the stock ledger
/// behavior; difficulty is fixed for the chain's lifetime.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub difficulty: u32,
    pub mining_reward: f64,
    pub network_identity: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            mining_reward: MINING_REWARD,
            network_identity: NETWORK_IDENTITY.to_string(),
        }
    }
}

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Stored hash differs from the hash recomputed over current fields.
    HashMismatch,
    /// previous_hash does not match the predecessor's stored hash.
    LinkageMismatch,
    /// Stored hash is missing the required leading-zero prefix.
    ProofOfWorkMismatch,
}

/// First failing check found by the validator: which block, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::HashMismatch => {
                write!(f, "invalid hash detected in block {}", self.index)
            }
            ViolationKind::LinkageMismatch => {
                write!(f, "invalid chain linkage detected at block {}", self.index)
            }
            ViolationKind::ProofOfWorkMismatch => {
                write!(f, "invalid proof of work detected in block {}", self.index)
            }
        }
    }
}

/// Simple in-memory blockchain with Proof-of-Work and a pending pool.
///
/// The pool and the block list are owned exclusively by this struct and
/// every mutating operation takes `&mut self`, so a single owner cannot
/// race a seal against pool appends. Concurrent callers wrap the chain in
/// a `Mutex`.
#[derive(Debug)]
pub struct Blockchain {
    pub(crate) chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
    config: ChainConfig,
}

impl Blockchain {
    /// Initialize a new blockchain with a mined genesis block.
    pub fn new(difficulty: u32) -> Self {
        Self::with_config(ChainConfig {
            difficulty,
            ..ChainConfig::default()
        })
    }

    /// Same as `new`, with every parameter supplied by the caller.
    pub fn with_config(config: ChainConfig) -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending_transactions: Vec::new(),
            config,
        };
        let mut genesis = Block::new(0, Vec::new(), "0".repeat(HASH_HEX_LEN));
        genesis.mine(bc.config.difficulty);
        bc.chain.push(genesis);
        info!("genesis block created and mined");
        bc
    }

    /// Return the last block in the chain.
    pub fn latest_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(ChainError::EmptyChain)
    }

    /// Queue a transaction for the next sealed block. No balance checks:
    /// sender and recipient are opaque identifiers.
    pub fn add_transaction(&mut self, sender: &str, recipient: &str, amount: f64) -> Result<()> {
        let tx = Transaction::new(sender, recipient, amount)?;
        debug!("transaction queued: {} -> {}: {}", sender, recipient, amount);
        self.pending_transactions.push(tx);
        Ok(())
    }

    /// Seal the pending pool into a new mined block:
    /// - append a reward transaction (network identity -> miner)
    /// - build the block at the tip and run PoW at the configured difficulty
    /// - append it to the chain and clear the pool
    pub fn seal_pending_transactions(&mut self, miner_address: &str) -> Result<&Block> {
        self.seal_pending_transactions_with_cancel(miner_address, &AtomicBool::new(false))
    }

    /// Cancellable variant of `seal_pending_transactions`. When mining is
    /// aborted the pool is left exactly as it was, reward excluded.
    pub fn seal_pending_transactions_with_cancel(
        &mut self,
        miner_address: &str,
        cancel: &AtomicBool,
    ) -> Result<&Block> {
        let reward = Transaction::new(
            &self.config.network_identity,
            miner_address,
            self.config.mining_reward,
        )?;
        let mut transactions = self.pending_transactions.clone();
        transactions.push(reward);

        let index = self.chain.len() as u64;
        let previous_hash = self.latest_block()?.hash().to_string();
        let mut block = Block::new(index, transactions, previous_hash);

        info!("mining block #{}...", index);
        block.mine_with_cancel(self.config.difficulty, cancel)?;

        self.chain.push(block);
        self.pending_transactions.clear();
        info!("block #{} appended to the chain", index);
        self.latest_block()
    }

    /// Walk the chain and return the first failing check, if any. Genesis
    /// is trusted; every later block is re-hashed and checked for linkage
    /// and PoW independently of its stored state.
    pub fn first_violation(&self) -> Option<Violation> {
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let previous = &self.chain[i - 1];
            let index = i as u64;

            if current.compute_hash() != current.hash() {
                return Some(Violation {
                    index,
                    kind: ViolationKind::HashMismatch,
                });
            }
            if current.previous_hash() != previous.hash() {
                return Some(Violation {
                    index,
                    kind: ViolationKind::LinkageMismatch,
                });
            }
            if !current.satisfies_difficulty(self.config.difficulty) {
                return Some(Violation {
                    index,
                    kind: ViolationKind::ProofOfWorkMismatch,
                });
            }
        }
        None
    }

    /// Validate the entire chain: hashes, linkage and PoW. A `false` result
    /// describes an invalid chain, not a failure of the validator; the
    /// finding lands on the log.
    pub fn is_valid_chain(&self) -> bool {
        match self.first_violation() {
            Some(violation) => {
                warn!("chain validation failed: {violation}");
                false
            }
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.config.difficulty
    }

    /// Block at `index`, if present.
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.chain.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    /// Read-only view of the not-yet-sealed transactions.
    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }
}

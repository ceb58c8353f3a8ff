pub mod block;
pub mod model;

pub use block::Block;
pub use model::{Blockchain, ChainConfig, Violation, ViolationKind};

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Reward credited to the miner when a block is sealed.
pub const MINING_REWARD: f64 = 10.0;

/// Reserved sender identity on reward transactions.
pub const NETWORK_IDENTITY: &str = "Network";

/// Width of a hex-encoded SHA-256 digest; the genesis block points at a
/// sentinel previous-hash of this many `'0'` characters.
pub const HASH_HEX_LEN: usize = 64;

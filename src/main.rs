mod blockchain;
mod error;
mod transaction;

use dotenvy::dotenv;
use std::env;

use blockchain::{Blockchain, DEFAULT_DIFFICULTY};

fn main() -> Result<(), error::ChainError> {
    let _ = dotenv();
    env_logger::init();

    let difficulty: u32 = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);

    println!("⛓️ Creating ledger (difficulty={difficulty})");
    let mut bc = Blockchain::new(difficulty);

    println!("\n📝 Queueing transfers...");
    bc.add_transaction("alice", "bob", 1000.0)?;
    bc.add_transaction("bob", "carol", 500.0)?;
    bc.add_transaction("carol", "dave", 200.0)?;
    println!("{} transfers pending", bc.pending_transactions().len());

    println!("\n⛏️ Sealing first block...");
    bc.seal_pending_transactions("miner-1")?;

    println!("\n📝 Queueing more transfers...");
    bc.add_transaction("dave", "erin", 300.0)?;
    bc.add_transaction("erin", "frank", 150.0)?;

    println!("\n⛏️ Sealing second block...");
    let tip = bc.seal_pending_transactions("miner-1")?;
    println!("Tip is now #{} ({})", tip.index(), tip.hash());

    println!(
        "\n🔍 Chain valid: {} (length={}, difficulty={})",
        bc.is_valid_chain(),
        bc.len(),
        bc.difficulty()
    );

    println!("\n📊 Ledger contents:");
    for block in bc.blocks() {
        println!("\nBlock #{}", block.index());
        println!("Timestamp: {}", block.timestamp());
        println!("Previous hash: {}", block.previous_hash());
        println!("Hash: {}", block.hash());
        println!("Nonce: {}", block.nonce());
        for tx in block.transactions() {
            println!("  {} -> {}: {}", tx.sender(), tx.recipient(), tx.amount());
        }
    }

    Ok(())
}

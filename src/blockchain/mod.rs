pub mod block;
pub mod model;

pub use block::{Block, proof_of_work, valid_proof};
pub use model::Blockchain;

/// Default Proof-of-Work difficulty (number of leading zero hex digits).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Proof recorded on the genesis block, which no one mined.
pub const GENESIS_PROOF: u64 = 100;

/// Placeholder predecessor hash for the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

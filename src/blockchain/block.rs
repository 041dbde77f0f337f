use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the chain: an ordered batch of transactions plus the
/// linkage and Proof-of-Work metadata that ties it to its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: i64, // Unix timestamp in milliseconds (UTC)
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String, // Cached hash of the block
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            Utc::now().timestamp_millis(),
            GENESIS_PROOF,
            GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    /// Create a block from explicit field values. No field is defaulted
    /// here; zero is a legal index, proof and timestamp, never a sentinel.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        timestamp: i64,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        let mut block = Self {
            index,
            transactions,
            timestamp,
            proof,
            previous_hash,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute the SHA-256 hash of this block from `previous_hash`, the
    /// decimal timestamp and the JSON-serialized transactions. Pure over
    /// the current field values, so it doubles as the re-verification step
    /// during chain validation.
    pub fn compute_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!("{}{}{}", self.previous_hash, self.timestamp, txs_json);
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Brute-force the Proof-of-Work puzzle: the first `proof` such that
/// `valid_proof(last_proof, proof, difficulty)` holds. Unbounded CPU work;
/// run it on a blocking thread, never on the request path.
pub fn proof_of_work(last_proof: u64, difficulty: u32) -> u64 {
    let mut proof: u64 = 0;
    while !valid_proof(last_proof, proof, difficulty) {
        proof += 1;
    }
    proof
}

/// The puzzle predicate: does the hex SHA-256 digest of `"{last_proof}{proof}"`
/// start with `difficulty` zeros?
pub fn valid_proof(last_proof: u64, proof: u64, difficulty: u32) -> bool {
    let guess = format!("{last_proof}{proof}");
    let digest = hex::encode(Sha256::digest(guess.as_bytes()));
    digest.chars().take(difficulty as usize).all(|c| c == '0')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_tx() -> Transaction {
        Transaction::new("alice".into(), "bob".into(), 10)
    }

    #[test]
    fn genesis_has_defaults_and_valid_hash() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert!(b.transactions.is_empty());
        assert_eq!(b.proof, GENESIS_PROOF);
        assert_eq!(b.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(b.hash, b.compute_hash());
    }

    #[test]
    fn hash_is_pure_over_fields() {
        let b = Block::new(2, vec![demo_tx()], 1_700_000_000_000, 35293, "prev".into());
        assert_eq!(b.hash, b.compute_hash());
        assert_eq!(b.compute_hash(), b.compute_hash());
    }

    #[test]
    fn zero_valued_fields_are_not_defaulted() {
        let b = Block::new(0, Vec::new(), 0, 0, "prev".into());
        assert_eq!(b.index, 0);
        assert_eq!(b.timestamp, 0);
        assert_eq!(b.proof, 0);
    }

    #[test]
    fn tampering_changes_the_recomputed_hash() {
        let mut b = Block::new(2, vec![demo_tx()], 1_700_000_000_000, 35293, "prev".into());
        let stored = b.hash.clone();

        b.transactions.push(Transaction::new("mallory".into(), "bob".into(), 999));
        assert_ne!(stored, b.compute_hash());

        b.transactions.pop();
        assert_eq!(stored, b.compute_hash());

        b.timestamp += 1;
        assert_ne!(stored, b.compute_hash());
    }

    #[test]
    fn proof_of_work_finds_the_smallest_solution() {
        // Difficulty 2 keeps the search in the hundreds of attempts.
        let last_proof = 100;
        let proof = proof_of_work(last_proof, 2);

        assert!(valid_proof(last_proof, proof, 2));
        for smaller in 0..proof {
            assert!(!valid_proof(last_proof, smaller, 2));
        }
    }

    #[test]
    fn valid_proof_checks_the_digest_prefix() {
        let proof = proof_of_work(42, 2);
        let digest = hex::encode(sha2::Sha256::digest(format!("42{proof}").as_bytes()));
        assert!(digest.starts_with("00"));
        // A 64-digit prefix would demand an all-zero digest.
        assert!(!valid_proof(42, proof, 64));
    }
}

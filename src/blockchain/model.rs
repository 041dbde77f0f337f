use chrono::Utc;
use log::{debug, info};

use super::Block;
use crate::network::PeerRegistry;
use crate::transaction::Transaction;

/// Simple in-memory blockchain with Proof-of-Work and a pending pool.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pub current_transactions: Vec<Transaction>,
    pub peers: PeerRegistry,
    difficulty: u32,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(difficulty: u32) -> Self {
        Self {
            chain: vec![Block::genesis()],
            current_transactions: Vec::new(),
            peers: PeerRegistry::new(),
            difficulty,
        }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Seal the pending pool into a new block and append it. The pool is
    /// moved out and cleared in one step, so a transaction submitted after
    /// this call targets the following block. `previous_hash` falls back to
    /// the current head's hash when not supplied.
    pub fn add_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash.clone());
        let transactions = std::mem::take(&mut self.current_transactions);

        let block = Block::new(
            self.chain.len() as u64 + 1,
            transactions,
            Utc::now().timestamp_millis(),
            proof,
            previous_hash,
        );
        debug!(
            "sealed block #{} with {} txs (hash={})",
            block.index,
            block.transactions.len(),
            block.hash
        );

        self.chain.push(block);
        self.last_block()
    }

    /// Queue a transaction for the next mined block; returns the index of
    /// the block it is targeted for.
    pub fn add_transaction(&mut self, sender: String, recipient: String, amount: u64) -> u64 {
        self.current_transactions
            .push(Transaction::new(sender, recipient, amount));

        self.last_block().index + 1
    }

    /// Verify an arbitrary candidate chain: every block's stored hash must
    /// match its recomputed hash, and its `previous_hash` must equal the
    /// predecessor's stored hash. Associated function on purpose; the
    /// candidate is judged on its own, never against the local chain.
    pub fn is_chain_valid(chain: &[Block]) -> bool {
        for i in 1..chain.len() {
            let current = &chain[i];
            let previous = &chain[i - 1];

            if current.hash != current.compute_hash() {
                return false;
            }

            if current.previous_hash != previous.hash {
                return false;
            }
        }

        true
    }

    /// Longest-chain rule over already-fetched candidate chains: adopt the
    /// longest valid candidate that is strictly longer than the local
    /// chain. Returns whether the local chain was replaced.
    pub fn resolve_conflicts<I>(&mut self, candidates: I) -> bool
    where
        I: IntoIterator<Item = Vec<Block>>,
    {
        let mut new_chain: Option<Vec<Block>> = None;
        let mut max_length = self.chain.len();

        for candidate in candidates {
            if candidate.len() <= max_length {
                debug!(
                    "candidate chain of length {} not longer than {}, skipping",
                    candidate.len(),
                    max_length
                );
                continue;
            }
            if !Self::is_chain_valid(&candidate) {
                debug!(
                    "candidate chain of length {} failed validation, skipping",
                    candidate.len()
                );
                continue;
            }

            max_length = candidate.len();
            new_chain = Some(candidate);
        }

        if let Some(chain) = new_chain {
            info!(
                "replacing local chain of length {} with peer chain of length {}",
                self.chain.len(),
                chain.len()
            );
            self.chain = chain;
            return true;
        }

        false
    }
}

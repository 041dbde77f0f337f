use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Blockchain, DEFAULT_DIFFICULTY};
use crate::network::{ChainClient, DEFAULT_PEER_TIMEOUT_SECS};
use crate::transaction::Transaction;

/// Shared application state: the in-memory blockchain behind one coarse
/// lock, plus the outbound client used to fetch peer chains. The single
/// lock is what keeps `add_block`'s take-the-pool-and-clear step atomic
/// with respect to concurrent submissions.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
    pub client: ChainClient,
}

impl AppState {
    pub fn new(difficulty: u32, peer_timeout: Duration) -> Self {
        Self {
            blockchain: Mutex::new(Blockchain::new(difficulty)),
            client: ChainClient::new(peer_timeout),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            DEFAULT_DIFFICULTY,
            Duration::from_secs(DEFAULT_PEER_TIMEOUT_SECS),
        )
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: i64,
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub message: &'static str,
    pub transactions: &'a [Transaction],
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct AddPeersRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct AddPeersResponse {
    pub message: &'static str,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
    pub length: usize,
}

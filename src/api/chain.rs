use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, ChainResponse, MineResponse};
use crate::blockchain::proof_of_work;

/// Get the full blockchain. This is also the wire format peers consume
/// during conflict resolution.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: &bc.chain,
        length: bc.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Mine a new block:
/// - Snapshot the head's proof and hash under the lock
/// - Run the Proof-of-Work search on the blocking pool, lock released
/// - Re-lock, reject the solution if the head moved meanwhile
/// - Seal the pending pool into the new block and append it
#[post("/chain/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let (last_proof, head_hash, difficulty) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        let head = bc.last_block();
        (head.proof, head.hash.clone(), bc.difficulty())
    };

    // Unbounded CPU work; keep it off the async workers.
    let proof = match web::block(move || proof_of_work(last_proof, difficulty)).await {
        Ok(proof) => proof,
        Err(_) => return HttpResponse::InternalServerError().body("mining task failed"),
    };

    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    if bc.last_block().hash != head_hash {
        warn!("MINER - chain head moved during the search, discarding stale proof");
        return HttpResponse::Conflict().body("chain head moved while mining");
    }

    let block = bc.add_block(proof, Some(head_hash));
    info!(
        "MINER - sealed block #{} (proof={}, hash={})",
        block.index, block.proof, block.hash
    );

    HttpResponse::Ok().json(MineResponse {
        message: "A new Block has been mined.",
        index: block.index,
        transactions: block.transactions.clone(),
        timestamp: block.timestamp,
        proof: block.proof,
        previous_hash: block.previous_hash.clone(),
        hash: block.hash.clone(),
    })
}

use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// List the pending pool: transactions accepted but not yet mined.
#[get("/chain/transactions")]
pub async fn get_pending_transactions(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        message: "Fetching pending transactions",
        transactions: &bc.current_transactions,
    })
}

/// Submit a new transaction into the pending pool. Absent fields are
/// rejected by deserialization; empty addresses and a zero amount are
/// rejected here, leaving the pool untouched.
#[post("/chain/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let sender = body.sender.trim();
    let recipient = body.recipient.trim();

    if sender.is_empty() {
        warn!("POST /chain/transactions/new - rejected: empty sender");
        return HttpResponse::BadRequest().body("missing request body parameter: sender");
    }
    if recipient.is_empty() {
        warn!("POST /chain/transactions/new - rejected: empty recipient");
        return HttpResponse::BadRequest().body("missing request body parameter: recipient");
    }
    if body.amount == 0 {
        warn!("POST /chain/transactions/new - rejected: zero amount");
        return HttpResponse::BadRequest().body("amount must be non-zero");
    }

    let index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.add_transaction(sender.to_string(), recipient.to_string(), body.amount)
    };

    info!(
        "POST /chain/transactions/new - {} -> {} ({}) targeted for block {}",
        sender, recipient, body.amount, index
    );
    debug!("pending pool grew; next mined block will include this transfer");

    HttpResponse::Ok().json(NewTxResponse {
        message: format!("New transaction will be added to block number {index}"),
        index,
    })
}

use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};

use super::models::{AddPeersRequest, AddPeersResponse, AppState, ResolveResponse};

/// Register one or more peer addresses. The registry is a set, so
/// re-registering a peer is a no-op.
#[post("/chain/nodes/add")]
pub async fn add_peers(
    state: web::Data<AppState>,
    body: web::Json<AddPeersRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("missing request body parameter: nodes");
    }

    let nodes = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        let mut added = 0;
        for node in &body.nodes {
            let node = node.trim();
            if node.is_empty() {
                continue;
            }
            if bc.peers.add(node) {
                added += 1;
            }
        }
        info!("registered {} new peer(s), {} known", added, bc.peers.len());

        let mut nodes: Vec<String> = bc.peers.iter().cloned().collect();
        nodes.sort();
        nodes
    };

    HttpResponse::Ok().json(AddPeersResponse {
        message: "New nodes have been added to the blockchain",
        nodes,
    })
}

/// Resolve conflicts with the known peers using the longest-chain rule.
/// Every peer's chain is fetched with the state lock released; a failed
/// fetch is logged and skipped, the scan continues with the rest.
#[get("/chain/nodes/conflicts/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let peers: Vec<String> = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.peers.iter().cloned().collect()
    };

    let mut candidates = Vec::with_capacity(peers.len());
    for peer in &peers {
        match state.client.fetch_chain(peer).await {
            Ok(remote) => {
                debug!("peer {} reported a chain of length {}", peer, remote.chain.len());
                candidates.push(remote.chain);
            }
            Err(err) => warn!("skipping peer {peer}: {err}"),
        }
    }

    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    let replaced = bc.resolve_conflicts(candidates);

    let message = if replaced {
        "The chain has been replaced"
    } else {
        "The chain is authoritative and is not replaced"
    };

    HttpResponse::Ok().json(ResolveResponse {
        message,
        replaced,
        chain: bc.chain.clone(),
        length: bc.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test, web};

    use crate::api::{AppState, init_routes};

    fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(1, Duration::from_secs(1)))
    }

    #[actix_web::test]
    async fn peer_registration_deduplicates() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/chain/nodes/add")
            .set_json(serde_json::json!({
                "nodes": [
                    "http://127.0.0.1:8081",
                    "http://127.0.0.1:8082",
                    "http://127.0.0.1:8081"
                ]
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let nodes = body["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[actix_web::test]
    async fn empty_peer_list_is_rejected() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/chain/nodes/add")
            .set_json(serde_json::json!({ "nodes": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn resolving_with_no_peers_keeps_the_chain() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::get()
            .uri("/chain/nodes/conflicts/resolve")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["replaced"], false);
        assert_eq!(body["length"], 1);
    }
}

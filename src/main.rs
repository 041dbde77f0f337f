mod api;
mod blockchain;
mod network;
mod transaction;

use std::env;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use api::AppState;
use blockchain::DEFAULT_DIFFICULTY;
use network::DEFAULT_PEER_TIMEOUT_SECS;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let difficulty: u32 = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);
    let peer_timeout: u64 = env::var("PEER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PEER_TIMEOUT_SECS);

    println!("⛓️ Starting blockchain node at http://{host}:{port} (difficulty {difficulty})");

    let state = web::Data::new(AppState::new(difficulty, Duration::from_secs(peer_timeout)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

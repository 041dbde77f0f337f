use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::blockchain::Block;

/// What a peer reports from `GET <address>/chain`. The `length` field is
/// part of the wire contract but resolution compares the actual chain
/// length, not the reported one.
#[derive(Debug, Deserialize)]
pub struct RemoteChain {
    pub chain: Vec<Block>,
    #[allow(dead_code)]
    pub length: usize,
}

/// Outbound HTTP client for fetching peer chains during conflict
/// resolution. One instance is shared across handlers; the per-request
/// timeout keeps a stalled peer from blocking the whole scan.
#[derive(Debug, Clone)]
pub struct ChainClient {
    http: reqwest::Client,
}

impl ChainClient {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("build reqwest client");
        Self { http }
    }

    /// Fetch a peer's full chain. Fallible per peer: a timeout, connection
    /// error, non-2xx status or malformed body all surface as `Err` so the
    /// caller can skip this peer and keep scanning.
    pub async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, reqwest::Error> {
        let url = format!("{}/chain", peer.trim_end_matches('/'));
        debug!("fetching peer chain from {url}");

        self.http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<RemoteChain>()
            .await
    }
}

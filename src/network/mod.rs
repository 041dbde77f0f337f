pub mod client;
pub mod registry;

pub use client::{ChainClient, RemoteChain};
pub use registry::PeerRegistry;

/// Per-request timeout for peer chain fetches (seconds).
pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

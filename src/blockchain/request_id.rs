// src/blockchain/request_id.rs

use std::sync::atomic::{AtomicU64, Ordering};

// Hands out JSON-RPC request ids for one client. Starts at 0; the first id issued is 1.
#[derive(Debug, Default)]
pub struct RequestIdCounter {
    last: AtomicU64,
}

impl RequestIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id. Ids are never reused for the lifetime of the counter.
    pub fn next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last id handed out, or 0 if none yet.
    pub fn last_id(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod mcp;
pub mod utils;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Client for the remote Nerve API
    pub client: blockchain::NerveClient,
    /// The tool catalog, built once at startup
    pub tools: Arc<mcp::tools::ToolRegistry>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let client = blockchain::NerveClient::new(&config.api_base_url);
        Self {
            config,
            client,
            tools: Arc::new(mcp::tools::ToolRegistry::nerve()),
        }
    }
}

// src/blockchain/mod.rs

pub mod client;
pub use client::NerveClient;

pub mod models;
pub mod request_id;

pub use models::{NerveClientError, RestCall, RestMethod, RestOutcome};

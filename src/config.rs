// src/config.rs

use anyhow::{bail, Context, Result};
use std::env;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.nerve.network";
pub const DEFAULT_PORT: u16 = 8080;

// A struct to hold all configuration, loaded once at startup from the environment / .env file.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the Nerve API, without a trailing slash.
    pub api_base_url: String,
    /// Listen port when serving over HTTP instead of stdio.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("NERVE_API_BASE_URL").ok(),
            env::var("PORT").ok(),
        )
    }

    /// Builds a config from raw variable values, applying defaults and checks.
    pub fn from_vars(base_url: Option<String>, port: Option<String>) -> Result<Self> {
        let api_base_url = resolve_base_url(base_url.as_deref())?;

        let port = match port.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.parse().context("PORT must be a valid number")?,
            _ => DEFAULT_PORT,
        };

        Ok(Config { api_base_url, port })
    }
}

/// Picks the override if set and non-blank, strips trailing slashes, and
/// checks that the result is an absolute http(s) URL.
pub fn resolve_base_url(raw: Option<&str>) -> Result<String> {
    let candidate = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_API_BASE_URL,
    };
    let trimmed = candidate.trim_end_matches('/');

    let parsed = Url::parse(trimmed)
        .with_context(|| format!("NERVE_API_BASE_URL is not a valid URL: {}", candidate))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        bail!(
            "NERVE_API_BASE_URL must use http or https, got '{}'",
            parsed.scheme()
        );
    }
    Ok(trimmed.to_string())
}

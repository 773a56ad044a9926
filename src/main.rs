// src/main.rs

use anyhow::{Context, Result};
use nerve_mcp_server::{
    api::create_router,
    config::Config,
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};
use std::env;
use std::net::SocketAddr;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("🚀 HTTP Server listening on {}", addr);
    axum::serve(listener, app.into_make_service())
        .await
        .context("HTTP server error")
}

// --- MCP Server Logic ---
async fn run_mcp_server(state: AppState) -> Result<()> {
    info!(
        "🚀 Nerve RPC MCP running (stdio), base URL: {}",
        state.config.api_base_url
    );

    let mut stdin = io::BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    loop {
        let mut line = String::new();

        match stdin.read_line(&mut line).await {
            Ok(0) => {
                info!("EOF received, shutting down MCP server");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {}", line);

                let response = match serde_json::from_str::<Request>(line) {
                    Ok(request) => handle_mcp_request(request, state.clone()).await,
                    Err(parse_error) => {
                        error!("JSON parse error: {}", parse_error);
                        Some(Response::error(
                            serde_json::Value::Null,
                            error_codes::PARSE_ERROR,
                            format!("Parse error: {}", parse_error),
                        ))
                    }
                };

                if let Some(response) = response {
                    let response_json = serde_json::to_string(&response)?;
                    debug!("Sending: {}", response_json);
                    stdout
                        .write_all(format!("{}\n", response_json).as_bytes())
                        .await
                        .context("failed to write response to stdout")?;
                    stdout.flush().await?;
                }
            }
            Err(e) => {
                return Err(e).context("failed to read from stdin");
            }
        }
    }

    info!("MCP server shutting down");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout belongs to the MCP transport.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nerve_mcp_server=info,nerve_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::new(config);

    // stdio unless asked to serve HTTP
    if env::args().any(|arg| arg == "--http") {
        run_http_server(state).await
    } else {
        run_mcp_server(state).await
    }
}

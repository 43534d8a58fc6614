//! Paystack MCP server binary.
//!
//! # Usage
//!
//! ```bash
//! PAYSTACK_SECRET_KEY=sk_test_... paystack-mcp
//!
//! # Configure logging level (diagnostics go to stderr)
//! RUST_LOG=debug PAYSTACK_SECRET_KEY=sk_test_... paystack-mcp
//! ```
//!
//! # Environment Variables
//!
//! - `PAYSTACK_SECRET_KEY` — Paystack secret key (required)
//! - `PAYSTACK_ENVIRONMENT` — `test` or `live` (default: `test`)
//! - `PAYSTACK_BASE_URL` — API base URL override (default: `https://api.paystack.co`)
//! - `RUST_LOG` — Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded if present.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use paystack::client::PaystackClient;
use paystack::config::PaystackConfig;
use paystack_mcp::dispatch::ToolDispatcher;
use paystack_mcp::rpc;

#[tokio::main]
async fn main() {
    // stdout carries the protocol; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = PaystackConfig::from_env()?;
    tracing::info!(environment = %config.environment, "Loaded configuration");

    let client = PaystackClient::new(config)?;
    let dispatcher = ToolDispatcher::new(Arc::new(client));

    tracing::info!("Serving MCP over stdio");
    rpc::serve_stdio(dispatcher).await?;
    tracing::info!("Stdin closed, shutting down");
    Ok(())
}

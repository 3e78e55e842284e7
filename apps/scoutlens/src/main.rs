//! # Scoutlens - Evidence Resolution Server
//!
//! The main binary for the Scoutlens grounded coaching engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for dataset queries and integrity checks
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │               apps/scoutlens (THE BINARY)             │
//! │                                                       │
//! │        ┌─────────────┐       ┌─────────────┐          │
//! │        │   CLI       │       │   HTTP API  │          │
//! │        │  (clap)     │       │   (axum)    │          │
//! │        └──────┬──────┘       └──────┬──────┘          │
//! │               │                     │                 │
//! │               └──────────┬──────────┘                 │
//! │                          ▼                            │
//! │                 ┌─────────────────┐                   │
//! │                 │ scoutlens-core  │                   │
//! │                 │  (THE ENGINE)   │                   │
//! │                 └─────────────────┘                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! scoutlens server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! scoutlens matches
//! scoutlens scout --team-id NAVI
//! scoutlens evidence --evidence-ref "NAVI-FNC-G1:000042" --radius 90
//! scoutlens verify
//! ```

mod api;
mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — SCOUTLENS_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SCOUTLENS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scoutlens=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Scoutlens startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗ ██████╗ ██████╗ ██╗   ██╗████████╗██╗     ███████╗███╗   ██╗███████╗
  ██╔════╝██╔════╝██╔═══██╗██║   ██║╚══██╔══╝██║     ██╔════╝████╗  ██║██╔════╝
  ███████╗██║     ██║   ██║██║   ██║   ██║   ██║     █████╗  ██╔██╗ ██║███████╗
  ╚════██║██║     ██║   ██║██║   ██║   ██║   ██║     ██╔══╝  ██║╚██╗██║╚════██║
  ███████║╚██████╗╚██████╔╝╚██████╔╝   ██║   ███████╗███████╗██║ ╚████║███████║
  ╚══════╝ ╚═════╝ ╚═════╝  ╚═════╝    ╚═╝   ╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝

  Evidence Resolution Server v{}

  Deterministic • Grounded • Verifiable
"#,
        env!("CARGO_PKG_VERSION")
    );
}

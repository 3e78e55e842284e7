//! # Scoutlens CLI Module
//!
//! This module implements the CLI interface for Scoutlens.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `matches` - List all match ids in the dataset
//! - `teams` - List all team ids in the dataset
//! - `moments` - List critical moments for one match
//! - `scout` - Show tactical patterns for one team
//! - `evidence` - Build an evidence panel for one reference
//! - `verify` - Run the integrity verifier over the whole dataset
//! - `dataset` - Show dataset provenance metadata

mod commands;

use clap::{Parser, Subcommand};
use scoutlens_core::ScoutError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Scoutlens - Evidence Resolution Server
///
/// A deterministic, grounded query engine over a frozen match dataset.
/// Every claim it serves is backed by a resolvable evidence reference.
#[derive(Parser, Debug)]
#[command(name = "scoutlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the dataset pack root
    #[arg(short = 'P', long, global = true, default_value = "artifacts/demo_pack")]
    pub pack_root: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// List all match ids in the dataset
    Matches,

    /// List all team ids in the dataset
    Teams,

    /// List critical moments for one match
    Moments {
        /// Match id to list moments for
        #[arg(short, long)]
        match_id: String,
    },

    /// Show tactical patterns for one team
    Scout {
        /// Team id to scout
        #[arg(short, long)]
        team_id: String,
    },

    /// Build an evidence panel for one reference
    Evidence {
        /// Evidence reference to resolve
        #[arg(short, long)]
        evidence_ref: String,

        /// Context window radius in seconds
        #[arg(short, long, default_value = "60")]
        radius: u32,
    },

    /// Run the integrity verifier over the whole dataset
    Verify,

    /// Show dataset provenance metadata
    Dataset,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ScoutError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&cli.pack_root, &host, port).await,
        Some(Commands::Matches) => cmd_matches(&cli.pack_root, json_mode),
        Some(Commands::Teams) => cmd_teams(&cli.pack_root, json_mode),
        Some(Commands::Moments { match_id }) => cmd_moments(&cli.pack_root, json_mode, &match_id),
        Some(Commands::Scout { team_id }) => cmd_scout(&cli.pack_root, json_mode, &team_id),
        Some(Commands::Evidence {
            evidence_ref,
            radius,
        }) => cmd_evidence(&cli.pack_root, json_mode, &evidence_ref, radius),
        Some(Commands::Verify) => cmd_verify(&cli.pack_root, json_mode),
        Some(Commands::Dataset) => cmd_dataset(&cli.pack_root, json_mode),
        None => {
            // No subcommand - run the verifier by default
            cmd_verify(&cli.pack_root, json_mode)
        }
    }
}

//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to
//! command-specific modules.

mod analyze;
mod check;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "adshield")]
#[command(about = "AI-assisted scam, phishing, and deepfake detection relay")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address: a port, a host, or host:port
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Check extraction tools and API configuration
    Check,

    /// Analyze text from the command line
    Analyze {
        /// Text to analyze
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(settings, bind.as_deref()).await,
        Commands::Check => check::cmd_check(&settings),
        Commands::Analyze { text, file } => analyze::cmd_analyze(settings, text, file).await,
    }
}

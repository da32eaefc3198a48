//! AdShield - AI-assisted scam, phishing, and deepfake detection relay.
//!
//! A backend service that accepts user-submitted text, images, and
//! documents, forwards derived content to hosted inference models, and
//! combines the model outputs with local keyword/pattern heuristics
//! into a unified risk verdict.

mod analysis;
mod cli;
mod config;
mod deepfake;
mod extract;
mod inference;
mod server;
mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "adshield=info"
    } else {
        "adshield=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}

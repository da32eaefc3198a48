//! Web server for the analysis API.
//!
//! Maps the HTTP surface onto the analysis services:
//! - text extraction (OCR chain)
//! - text and document scam analysis
//! - deepfake image detection
//! - history placeholders

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Settings;
use crate::deepfake::DeepfakeDetector;
use crate::extract::TextExtractor;
use crate::inference::{InferenceClient, InferenceConfig};

/// Shared state for the web server.
///
/// Requests never share mutable data; everything here is immutable
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub analyzer: Arc<Analyzer>,
    pub detector: Arc<DeepfakeDetector>,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let lexicon = settings.load_lexicon()?;
        let client = Arc::new(InferenceClient::new(InferenceConfig::from_settings(
            &settings,
        )));
        let extractor = TextExtractor::new(client.clone());
        let analyzer = Arc::new(Analyzer::new(&settings, lexicon, client.clone(), extractor));
        let detector = Arc::new(DeepfakeDetector::new(
            client,
            settings.deepfake_model.clone(),
        ));

        Ok(Self {
            settings: Arc::new(settings),
            analyzer,
            detector,
        })
    }
}

/// Start the web server.
pub async fn serve(settings: Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

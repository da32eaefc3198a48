//! One-shot text analysis command.

use std::path::PathBuf;

use console::style;

use crate::config::Settings;
use crate::server::AppState;

/// Analyze text locally and print the JSON verdict.
pub async fn cmd_analyze(
    settings: Settings,
    text: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = match (text, file) {
        (Some(text), None) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)?,
        (Some(_), Some(_)) => anyhow::bail!("pass either text or --file, not both"),
        (None, None) => anyhow::bail!("nothing to analyze; pass text or --file"),
    };

    let state = AppState::new(settings)?;
    let outcome = state.analyzer.analyze_text(&text).await;

    if let Some(reason) = outcome.degradation() {
        eprintln!("{} degraded: {}", style("!").yellow(), reason);
    }
    println!("{}", serde_json::to_string_pretty(outcome.value())?);

    Ok(())
}

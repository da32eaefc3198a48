//! Diagnostics command.

use console::style;

use crate::config::Settings;
use crate::extract::TextExtractor;

/// Print extraction tool availability and API configuration.
pub fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    println!("{} Extraction tools", style("→").cyan());
    for (tool, available) in TextExtractor::check_tools() {
        if available {
            println!("  {} {}", style("✓").green(), tool);
        } else {
            println!("  {} {} (not found in PATH)", style("✗").red(), tool);
        }
    }

    println!("{} Inference API", style("→").cyan());
    if settings.hf_api_token.is_some() {
        println!("  {} token configured", style("✓").green());
    } else {
        println!(
            "  {} token not configured (local heuristics and mock data only)",
            style("✗").red()
        );
    }
    println!("  text:     {}", settings.phishing_model);
    println!("  spam:     {}", settings.spam_model);
    println!("  deepfake: {}", settings.deepfake_model);
    for model in &settings.ocr_models {
        println!("  ocr:      {}", model);
    }

    println!("{} Limits", style("→").cyan());
    println!("  text:     {} MB", settings.max_text_size_mb);
    println!("  document: {} MB", settings.max_document_size_mb);

    Ok(())
}

//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let default_bind = format!("{}:{}", settings.api_host, settings.api_port);
    let (host, port) = parse_bind_address(bind.unwrap_or(&default_bind), settings.api_port)?;

    println!("{} AdShield AI backend", style("→").cyan());
    println!("  API:      http://{}:{}", host, port);
    println!("  Frontend: {}", settings.frontend_url);
    if settings.hf_api_token.is_some() {
        println!("  HF token: {} Configured", style("✓").green());
    } else {
        println!("  HF token: {} Not configured", style("✗").red());
        println!();
        println!(
            "  {} Without a token the API answers with local heuristics and mock data only.",
            style("!").yellow()
        );
        println!("    1. Get a token from https://huggingface.co/settings/tokens");
        println!("    2. Create a .env file with: HF_API_TOKEN=your_token_here");
    }
    println!();
    println!("  Endpoints:");
    println!("  - POST /api/v1/text/extract");
    println!("  - POST /api/v1/text/analyze");
    println!("  - POST /api/v1/doc/analyze");
    println!("  - POST /api/v1/deepfake/analyze");
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:<default>
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
fn parse_bind_address(bind: &str, default_port: u16) -> anyhow::Result<(String, u16)> {
    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    // Must be just a host, use the default port
    Ok((bind.to_string(), default_port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("3030", 8000).unwrap(),
            ("127.0.0.1".to_string(), 3030)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0", 8000).unwrap(),
            ("0.0.0.0".to_string(), 8000)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:9000", 8000).unwrap(),
            ("0.0.0.0".to_string(), 9000)
        );
    }
}

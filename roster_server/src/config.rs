use std::env;
use std::fs;

use roster_core::types::TimeSpan;

const DEFAULT_PORT: u16 = 8080;

/// Server configuration gathered from the environment:
/// - `ROSTER_PORT` — listen port (default 8080)
/// - `ROSTER_SPANS` — path to a JSON array of time spans; built-in
///   Morning/Evening defaults when unset
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub spans: Vec<TimeSpan>,
}

pub fn load() -> Result<ServerConfig, String> {
    let port = parse_port(env::var("ROSTER_PORT").ok());

    let spans = match env::var("ROSTER_SPANS") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)
                .map_err(|e| format!("cannot read span config {}: {}", path, e))?;
            parse_spans(&raw)?
        }
        Err(_) => default_spans(),
    };

    Ok(ServerConfig { port, spans })
}

pub fn parse_port(value: Option<String>) -> u16 {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn parse_spans(raw: &str) -> Result<Vec<TimeSpan>, String> {
    let spans: Vec<TimeSpan> =
        serde_json::from_str(raw).map_err(|e| format!("invalid span config: {}", e))?;
    if spans.is_empty() {
        return Err("span config contains no spans".to_string());
    }
    for span in &spans {
        if span.duration_minutes().is_none() {
            return Err(format!(
                "span {} ({}) has an invalid window {}-{}",
                span.id, span.name, span.start_time, span.end_time
            ));
        }
    }
    Ok(spans)
}

pub fn default_spans() -> Vec<TimeSpan> {
    vec![
        TimeSpan::new(1, "Morning", "06:00", "14:00"),
        TimeSpan::new(2, "Evening", "14:00", "22:00"),
    ]
}

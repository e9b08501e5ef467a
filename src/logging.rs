use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber with configured format and output
///
/// Logs always go to stderr: stdout carries the MCP stdio transport.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    // Build filter from config level or environment variable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Apply format based on config and initialize
    // Use try_init() to gracefully handle already-initialized subscriber (common in tests)
    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .json()
            .with_env_filter(filter)
            .try_init(),
        "pretty" => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .pretty()
            .with_env_filter(filter)
            .try_init(),
        _ => {
            // Default to compact
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .compact()
                .with_env_filter(filter)
                .try_init()
        }
    };

    // Ignore error if subscriber is already initialized (common in tests)
    result.or(Ok(()))
}

/// Redact an API credential for safe logging
/// Shows first 4 chars + last 1 char, hides middle
/// Returns "[REDACTED]" for strings ≤6 characters
pub fn redact_secret(secret: &str) -> String {
    if secret.len() <= 6 {
        return "[REDACTED]".to_string();
    }

    let visible_start = 4;
    let visible_end = 1;

    format!(
        "{}***{}",
        &secret[..visible_start],
        &secret[secret.len() - visible_end..]
    )
}

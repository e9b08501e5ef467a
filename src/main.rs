use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::info;
use x_connector::config::Config;
use x_connector::logging;
use x_connector::mcp::McpServer;
use x_connector::twitter::TwitterClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; real environment wins
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logging::init(&config.logging)?;

    info!(
        api_key = %logging::redact_secret(config.twitter.api_key.expose_secret()),
        api_url = %config.twitter.api_url,
        "starting x-mcp"
    );

    let client = TwitterClient::new(&config.twitter)?;
    let server = McpServer::new(Arc::new(client));

    server.run_stdio().await
}

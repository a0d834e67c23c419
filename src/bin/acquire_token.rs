use anyhow::{Context, Result};
use clap::Parser;
use graph_inbox::adapters::http;
use graph_inbox::adapters::identity::{ConfidentialClient, TokenEndpoint};
use graph_inbox::utils::{logger, validation::Validate};
use graph_inbox::CliConfig;

/// 只測試 client-credentials token 是否能取得，不呼叫 Graph
#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose, config.json_logs);

    let settings = config
        .load_settings()
        .context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    println!("🔐 Client credentials token check");
    println!("  Tenant ID: {}", settings.tenant_id);
    println!("  Client ID: {}", settings.client_id);
    println!("  Scope: {}", settings.scope);

    let client = http::build_client(settings.timeout_seconds)?;
    let endpoint = TokenEndpoint::from_config(client, &settings);
    let token = ConfidentialClient::new(endpoint)
        .acquire_token_for_client()
        .await
        .context("Failed to acquire token")?;

    println!("✅ Token acquired");
    println!("  Token type: {}", token.token_type);
    match token.expires_at {
        Some(expires_at) => println!("  Expires at: {}", expires_at.to_rfc3339()),
        None => println!("  Expires at: unknown"),
    }
    println!("  Token preview: {}", token.preview(16));

    Ok(())
}

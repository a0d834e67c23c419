use clap::Parser;
use graph_inbox::utils::{logger, validation::Validate};
use graph_inbox::{app, CliConfig, Outcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting graph-inbox");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 合併並驗證配置
    let settings = match config.load_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!(
        "📬 Latest {} messages in mailbox {}",
        settings.top,
        settings.mailbox
    );

    let mut stdout = std::io::stdout();
    match app::run(&settings, &mut stdout).await? {
        Outcome::Listed(count) => tracing::info!("✅ Printed {} messages", count),
        Outcome::Empty => tracing::info!("✅ Mailbox has no messages"),
        Outcome::Failed(kind) => tracing::warn!("Request finished with failure: {:?}", kind),
    }

    Ok(())
}

use anyhow::Result;
use peakform::{config, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    dotenv::dotenv().ok();

    // Load configuration first (before logging setup); a missing API key stops here
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG directives override the configured level
    let (env_filter, log_level) = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => {
            let level = filter.to_string();
            (filter, level)
        }
        Err(_) => {
            let level = config.server.logs.level.clone();
            if let Err(e) = validate_log_level(&level) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            (tracing_subscriber::EnvFilter::new(&level), level)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .init();

    info!("Starting PeakForm server with log level: {}", log_level);
    info!(
        "Configuration loaded (model: {}, feedback file: {})",
        config.llm.model, config.feedback.path
    );

    server::run(config).await?;

    Ok(())
}

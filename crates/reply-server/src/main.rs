use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reply_core::AddonConfig;
use reply_server::logging::init_logging;
use reply_server::{run_server, AppState};

#[derive(Parser, Debug, Clone)]
#[command(name = "reply-server")]
#[command(about = "AI reply generation for support tickets")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8090")]
    port: u16,

    /// Directory holding one `<id>.json` file per ticket
    #[arg(long, env = "TICKETS_DIR")]
    tickets_dir: Option<PathBuf>,

    /// Explicit addon config file (JSON or TOML)
    #[arg(long, env = "REPLY_CONFIG")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => AddonConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AddonConfig::load(),
    };

    let tickets_dir = cli
        .tickets_dir
        .unwrap_or_else(|| reply_core::config::app_data_dir().join("tickets"));

    if cli.debug {
        log::debug!("Server configuration:");
        log::debug!("  Port: {}", cli.port);
        log::debug!("  Tickets: {:?}", tickets_dir);
        log::debug!("  Backend: {}", config.backend.as_str());
        log::debug!("  Language: {}", config.response_language.as_str());
    }

    let state = AppState::with_tickets_dir(config, tickets_dir)
        .await
        .context("Failed to initialize ticket store")?;

    run_server(cli.port, state).await?;
    Ok(())
}

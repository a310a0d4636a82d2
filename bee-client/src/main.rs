use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use bee_client::{
    api::HttpGameService,
    config::Config,
    controller::SessionController,
    logging,
    tui::{self, app::LaunchOptions},
};

/// Bee Genius - find words in a seven-letter hive, alone or with friends
#[derive(Parser, Debug)]
#[command(name = "bee-genius")]
#[command(version, long_about = None)]
struct Args {
    /// Base URL of the game service (overrides BEE_BACKEND_HOST)
    #[arg(long)]
    backend_host: Option<String>,

    /// Public URL used for share links (overrides BEE_PUBLIC_URL)
    #[arg(long)]
    public_url: Option<String>,

    /// Open the join form for this game code
    #[arg(long, value_name = "CODE")]
    join: Option<String>,

    /// Player name to join with
    #[arg(long)]
    name: Option<String>,

    /// Rejoin a game you already played in instead of joining fresh
    #[arg(long, requires = "join")]
    rejoin: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(host) = args.backend_host {
        config.backend_host = host;
    }
    if let Some(url) = args.public_url {
        config.public_url = url;
    }

    let _log_guard = logging::init(&config)?;
    info!("Starting Bee Genius against {}", config.backend_host);

    let service =
        Arc::new(HttpGameService::new(&config).context("Failed to create service client")?);
    let (controller, updates) = SessionController::new(service, config);

    let launch = LaunchOptions {
        join_code: args.join,
        player_name: args.name,
        rejoin: args.rejoin,
    };

    tui::run(controller, updates, launch).await
}

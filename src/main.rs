use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, GameCommand, ListingCommand, StoreCommand};
use config::Config;
use gamestock_core::{HttpRemote, SyncCoordinator};

#[derive(Parser)]
#[command(name = "gamestock")]
#[command(version)]
#[command(about = "Manage the games, stores and listings of a game catalog server", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage games
    Game(GameCommand),

    /// Manage stores
    Store(StoreCommand),

    /// Manage listings (a game offered by a store)
    Listing(ListingCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamestock=info,gamestock_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;

    match cli.command {
        Some(Commands::Game(cmd)) => cmd.run(&connect(&config)).await?,
        Some(Commands::Store(cmd)) => cmd.run(&connect(&config)).await?,
        Some(Commands::Listing(cmd)) => cmd.run(&connect(&config)).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli.config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn connect(config: &Config) -> SyncCoordinator<HttpRemote> {
    let remote =
        HttpRemote::new(config.server_url.value.as_str()).with_api_prefix(&config.api_prefix.value);
    debug!(
        server_url = remote.server_url(),
        api_prefix = remote.api_prefix(),
        "Using catalog server"
    );
    SyncCoordinator::new(remote)
}

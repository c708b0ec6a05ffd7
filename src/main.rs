use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{ConfigCommand, FichaCommand, LookupCommand, ShellCommand};
use fichas::{Config, Controller, FichaError, HttpSyncClient};

#[derive(Parser)]
#[command(name = "fichas")]
#[command(version)]
#[command(about = "Manage cohort records (fichas) on a remote server", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage fichas
    Ficha(FichaCommand),

    /// Show programs, sites and statuses
    Lookup(LookupCommand),

    /// Start an interactive session
    Shell(ShellCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "fichas=warn",
        1 => "fichas=info",
        _ => "fichas=debug,reqwest=debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Ficha(cmd)) => {
            let mut controller = connect(&config).await?;
            cmd.run(&mut controller).await?;
        }
        Some(Commands::Lookup(cmd)) => {
            let controller = connect(&config).await?;
            cmd.run(&controller)?;
        }
        Some(Commands::Shell(cmd)) => {
            let mut controller = connect(&config).await?;
            cmd.run(&mut controller).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Builds the controller and runs its initial loads.
async fn connect(config: &Config) -> Result<Controller<HttpSyncClient>, FichaError> {
    let client = HttpSyncClient::from_config(config)?;
    tracing::info!(
        "Using {} (API {})",
        client.base_url(),
        client.api_version()
    );

    let mut controller = Controller::new(client);
    controller.init().await;
    Ok(controller)
}

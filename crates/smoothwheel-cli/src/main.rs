use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoothwheel_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "smoothwheel")]
#[command(author, version, about = "Inertial mouse-wheel scrolling engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of ~/.config/smoothwheel/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a wheel script and print the resulting scroll offsets
    Simulate(commands::simulate::SimulateArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // init has to work even when the existing file no longer parses
    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = cli.command
    {
        init_logging("info");
        let path = cli.config.unwrap_or_else(AppConfig::config_path);
        return commands::config::init(&path, force);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    init_logging(&config.general.log_level);

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(&config, args).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => {
                let path = cli.config.unwrap_or_else(AppConfig::config_path);
                commands::config::init(&path, force)
            }
        },
    }
}

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

//! CLI application for locating venues from map links.

mod commands;
mod http;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, config, extract, nearby, theme};

/// mapcoord - Pull coordinates out of map links and find nearby venues
#[derive(Parser)]
#[command(name = "mapcoord")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract coordinates from a single map link
    Extract(extract::ExtractArgs),

    /// Extract coordinates from lists of map links
    Batch(batch::BatchArgs),

    /// List venues within a radius of a point
    Nearby(nearby::NearbyArgs),

    /// Resolve the display theme
    Theme(theme::ThemeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Nearby(args) => nearby::run(args, config_path).await,
        Commands::Theme(args) => theme::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}

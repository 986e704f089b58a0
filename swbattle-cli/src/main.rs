//! SWBATTLE CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the API server
//! - seed: Build a catalog snapshot from SWAPI
//! - battle: Play battle rounds from a catalog snapshot

mod battle_cmd;
mod seed;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swbattle")]
#[command(about = "Star Wars card battles over a GraphQL catalog")]
struct Cli {
    /// Random seed for battle selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve(server::ServerArgs),
    /// Fetch SWAPI data into a catalog snapshot
    Seed(seed::SeedArgs),
    /// Play battle rounds from a catalog snapshot
    Battle(battle_cmd::BattleArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Seed(args) => seed::run(args),
        Commands::Battle(args) => battle_cmd::run(args, cli.seed),
    }
}

/// Log to stderr, filtered by RUST_LOG (default: info)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

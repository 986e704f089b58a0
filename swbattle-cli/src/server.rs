//! Serve command - run the battle API and web client
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), serve()
//! - Level 3: check_static_dir(), check_data_path()
//! - Level 4: argument definitions

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use swbattle_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// HTTP port
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Web client build to serve at the root path
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Catalog snapshot (loaded at startup, rewritten on every change)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Check paths and build the config
/// 2. Serve until interrupted
pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(args, seed)?;
    serve(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    check_static_dir(&args.static_dir)?;
    match &args.data {
        Some(path) => check_data_path(path)?,
        None => tracing::warn!("No --data file: catalog edits are lost on restart"),
    }

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.display().to_string(),
        data_path: args.data,
        seed,
    })
}

fn serve(config: ServerConfig) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(run_server(config))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// A missing web client only disables the UI; a file in its place is an error
fn check_static_dir(path: &Path) -> Result<()> {
    if path.is_file() {
        anyhow::bail!("--static-dir {} is a file", path.display());
    }
    if !path.exists() {
        tracing::warn!("No web client at {}; serving the API only", path.display());
    }
    Ok(())
}

/// The snapshot parent must exist, otherwise every edit would fail to save
fn check_data_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        anyhow::bail!("--data {} is a directory", path.display());
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            anyhow::bail!("Directory for --data does not exist: {}", dir.display())
        }
        _ => Ok(()),
    }
}

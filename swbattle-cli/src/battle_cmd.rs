//! Battle command - play rounds from a catalog snapshot
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_catalog(), play_rounds(), report_results()
//! - Level 3: play_single_round()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use swbattle_core::{compatible_pool, BattleSession, Catalog, Category, Entity, ScoreState, Winner};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BattleArgs {
    /// Catalog snapshot JSON file
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Battle category: people (mass) or starships (crew)
    #[arg(long, default_value = "people")]
    pub category: Category,

    /// Number of rounds to play
    #[arg(long, default_value = "10")]
    pub rounds: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single round
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundRecord {
    round: usize,
    left: String,
    right: String,
    left_value: u64,
    right_value: u64,
    winner: Winner,
}

/// Aggregated results over all rounds
#[derive(Clone, Debug, Serialize)]
struct BattleReport {
    category: Category,
    rounds: Vec<RoundRecord>,
    draws: usize,
    scores: ScoreState,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run battle command
///
/// 1. Load the catalog
/// 2. Play the rounds
/// 3. Report results
pub fn run(args: BattleArgs, seed: Option<u64>) -> Result<()> {
    let catalog = load_catalog(&args.data)?;

    tracing::info!(
        "Starting {} battle: {} rounds from {}",
        args.category,
        args.rounds,
        args.data.display()
    );

    let report = play_rounds(&catalog, args.category, args.rounds, seed)?;

    report_results(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Failed to load catalog: {}", path.display()))
}

/// Play all rounds through one session
fn play_rounds(
    catalog: &Catalog,
    category: Category,
    rounds: usize,
    seed: Option<u64>,
) -> Result<BattleReport> {
    let pool = catalog.pool(category);
    let compatible = compatible_pool(&pool, category).len();
    if compatible < 2 {
        anyhow::bail!(
            "Not enough {} to battle: {} compatible, need 2",
            category,
            compatible
        );
    }

    let mut rng = create_rng(seed);
    let mut session = BattleSession::new(category);
    let mut records = Vec::with_capacity(rounds);

    for round in 1..=rounds {
        if let Some(record) = play_single_round(&mut session, &pool, round, &mut rng) {
            tracing::debug!(
                "Round {}: {} ({}) vs {} ({}) -> {:?}",
                record.round,
                record.left,
                record.left_value,
                record.right,
                record.right_value,
                record.winner
            );
            records.push(record);
        }
    }

    let draws = records.iter().filter(|r| r.winner == Winner::Draw).count();

    Ok(BattleReport {
        category,
        rounds: records,
        draws,
        scores: session.scores(),
    })
}

fn report_results(report: &BattleReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_text_results(report);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_round(
    session: &mut BattleSession,
    pool: &[Entity],
    round: usize,
    rng: &mut ChaCha8Rng,
) -> Option<RoundRecord> {
    let battle = session.play(pool, rng)?;

    Some(RoundRecord {
        round,
        left: battle.left().name.clone(),
        right: battle.right().name.clone(),
        left_value: battle.outcome.left_value,
        right_value: battle.outcome.right_value,
        winner: battle.outcome.winner,
    })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_text_results(report: &BattleReport) {
    let label = report.category.label();

    println!("=== {} battle ===", report.category);
    for r in &report.rounds {
        println!(
            "Round {:>3}: {} ({}: {}) vs {} ({}: {}) - {}",
            r.round,
            r.left,
            label,
            r.left_value,
            r.right,
            label,
            r.right_value,
            r.winner.message()
        );
    }
    println!();
    println!("Left wins:  {}", report.scores.left);
    println!("Right wins: {}", report.scores.right);
    println!("Draws:      {}", report.draws);
}

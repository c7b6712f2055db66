//! duel-sim: headless AI-vs-AI artillery duels.
//!
//! Usage:
//!   duel-sim --seed 7 --difficulty hard --max-turns 40
//!   duel-sim --config match.json --format text -v

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use barrage_core::commands::PlayerCommand;
use barrage_core::config::MatchConfig;
use barrage_core::enums::{ControlMode, Difficulty, GamePhase};
use barrage_core::events::SimEvent;
use barrage_core::state::MatchSnapshot;
use barrage_core::types::{CombatantId, TurnResult};
use barrage_sim::MatchEngine;

/// Run AI-vs-AI duels on generated terrain and report the outcome
#[derive(Parser, Debug)]
#[command(name = "duel-sim")]
#[command(about = "Run a headless AI-vs-AI artillery duel")]
struct Args {
    /// Random seed for deterministic runs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty tier for every combatant
    #[arg(long, value_enum, default_value_t = Tier::Medium)]
    difficulty: Tier,

    /// Stop after this many completed turns (draw by timeout)
    #[arg(long, default_value_t = 40)]
    max_turns: u32,

    /// Hard cap on simulation ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Match configuration JSON (defaults used for missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Enable debug logging from the simulation crates
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Tier {
    Easy,
    Medium,
    Hard,
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Easy => Difficulty::Easy,
            Tier::Medium => Difficulty::Medium,
            Tier::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// JSON output structure
#[derive(Serialize)]
struct DuelSummary {
    seed: u64,
    difficulty: Difficulty,
    /// "winner", "draw" or "timeout"
    outcome: String,
    winner: Option<String>,
    turns: u32,
    ticks: u64,
    survivors: Vec<Survivor>,
    shots: Vec<TurnResult>,
}

#[derive(Serialize)]
struct Survivor {
    name: String,
    health: u32,
    alive: bool,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "barrage_sim=debug,barrage_ai=debug,barrage_terrain=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match build_config(&args, seed) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let mut engine = match MatchEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            process::exit(1);
        }
    };

    let summary = run_duel(&mut engine, &args, seed);

    match args.format {
        Format::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize summary: {e}");
                process::exit(1);
            }
        },
        Format::Text => print_text(&summary),
    }
}

/// Load or default the match config, then force an all-AI roster with no think delay.
fn build_config(args: &Args, seed: u64) -> Result<MatchConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            MatchConfig::from_json_str(&json).map_err(|e| e.to_string())?
        }
        None => MatchConfig::default(),
    };

    config.seed = seed;
    config.ai_think_ticks = 0;
    for spec in &mut config.roster {
        spec.control = ControlMode::Ai {
            difficulty: args.difficulty.into(),
        };
    }
    Ok(config)
}

fn run_duel(engine: &mut MatchEngine, args: &Args, seed: u64) -> DuelSummary {
    engine.queue_command(PlayerCommand::StartMatch);

    let mut shots = Vec::new();
    let mut last = MatchSnapshot::default();
    for _ in 0..args.max_ticks {
        last = engine.tick();
        for event in &last.events {
            match event {
                SimEvent::ExplosionResolved { result, .. }
                | SimEvent::ShotOutOfBounds { result } => {
                    tracing::info!(
                        shooter = %result.shooter,
                        hit = ?result.hit,
                        damage = result.damage,
                        distance = ?result.distance_from_target,
                        "turn resolved"
                    );
                    shots.push(result.clone());
                }
                _ => {}
            }
        }
        if last.phase == GamePhase::MatchOver || last.turn_count >= args.max_turns {
            break;
        }
    }

    let name_of = |id: CombatantId| {
        last.combatants
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    };
    let outcome = match (last.phase, last.winner) {
        (GamePhase::MatchOver, Some(_)) => "winner",
        (GamePhase::MatchOver, None) => "draw",
        _ => "timeout",
    };

    DuelSummary {
        seed,
        difficulty: args.difficulty.into(),
        outcome: outcome.to_string(),
        winner: last.winner.and_then(name_of),
        turns: last.turn_count,
        ticks: last.time.tick,
        survivors: last
            .combatants
            .iter()
            .map(|c| Survivor {
                name: c.name.clone(),
                health: c.health,
                alive: c.alive,
            })
            .collect(),
        shots,
    }
}

fn print_text(summary: &DuelSummary) {
    println!(
        "seed {} | {:?} | {} turns, {} ticks",
        summary.seed, summary.difficulty, summary.turns, summary.ticks
    );
    for (i, shot) in summary.shots.iter().enumerate() {
        let outcome = match shot.hit {
            Some(id) => format!("hit {id} for {}", shot.damage),
            None => match shot.distance_from_target {
                Some(d) => format!("miss by {d:.0}"),
                None => "miss".to_string(),
            },
        };
        println!("  turn {:>3}: {} {}", i + 1, shot.shooter, outcome);
    }
    for s in &summary.survivors {
        let state = if s.alive { "alive" } else { "destroyed" };
        println!("  {:<16} {:>3} hp  {}", s.name, s.health, state);
    }
    match (&summary.winner, summary.outcome.as_str()) {
        (Some(name), _) => println!("Winner: {name}"),
        (None, "draw") => println!("Draw: nobody survived"),
        _ => println!("No result within the turn limit"),
    }
}

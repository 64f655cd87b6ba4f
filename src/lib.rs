pub mod batch;
pub mod combat;
pub mod damage;
pub mod error;
pub mod model;
pub mod random;
pub mod snapshot;

use crate::batch::run_batch;
use crate::combat::{Combat, TurnOutcome};
use crate::model::{validate_combatant, validate_encounter, EncounterFile};
use crate::random::SeededRandom;
use crate::snapshot::CombatSnapshot;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub mod prelude {
    pub use crate::combat::{Combat, Turn, TurnOutcome};
    pub use crate::error::CombatError;
    pub use crate::model::{Combatant, Move};
    pub use crate::random::{FixedRandom, RandomSource, ScriptedRandom, SeededRandom};
    pub use crate::snapshot::CombatSnapshot;
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub encounter_path: PathBuf,
    pub moves: Vec<usize>,
    pub seed: u64,
    pub resume_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub batch_runs: Option<usize>,
    pub max_turns: u32,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            encounter_path: PathBuf::from("encounter.json"),
            moves: vec![0],
            seed: 0,
            resume_path: None,
            snapshot_path: None,
            batch_runs: None,
            max_turns: 500,
        }
    }
}

pub fn load_encounter(path: &Path) -> anyhow::Result<EncounterFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read encounter file at {}", path.display()))?;
    let parsed: EncounterFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_encounter(&parsed)?;
    Ok(parsed)
}

pub fn load_snapshot(path: &Path) -> anyhow::Result<CombatSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot at {}", path.display()))?;
    let parsed: CombatSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse snapshot JSON from {}", path.display()))?;
    let invalid = || format!("Invalid snapshot at {}", path.display());
    validate_combatant(&parsed.combatant_one).with_context(invalid)?;
    validate_combatant(&parsed.combatant_two).with_context(invalid)?;
    if let Some(winner) = &parsed.winner {
        validate_combatant(winner).with_context(invalid)?;
    }
    Ok(parsed)
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.moves.is_empty() {
        anyhow::bail!("--moves needs at least one move index");
    }
    let mut encounter = load_encounter(&opts.encounter_path)?;

    if let Some(runs) = opts.batch_runs {
        if runs == 0 {
            anyhow::bail!("--batch must be > 0");
        }
        if opts.resume_path.is_some() || opts.snapshot_path.is_some() {
            anyhow::bail!("--batch cannot be combined with --resume or --snapshot");
        }
        let report = run_batch(&encounter, &opts.moves, runs, opts.seed, opts.max_turns)?;
        println!(
            "{} runs: {} wins {}, {} wins {}, undecided {}, average {:.2} turns",
            report.runs,
            encounter.combatant_one.name,
            report.one_wins,
            encounter.combatant_two.name,
            report.two_wins,
            report.undecided,
            report.average_turns
        );
        return Ok(());
    }

    let resume = opts.resume_path.as_deref().map(load_snapshot).transpose()?;
    if let Some(snapshot) = &resume {
        snapshot.restore_combatants(&mut encounter.combatant_one, &mut encounter.combatant_two);
    }

    let mut combat = Combat::new(
        &mut encounter.combatant_one,
        &mut encounter.combatant_two,
        SeededRandom::new(opts.seed),
    );
    if let Some(snapshot) = &resume {
        combat.set_state_from_snapshot(snapshot);
    }

    for &move_index in &opts.moves {
        if combat.is_winner_decided() {
            break;
        }
        let attacker = combat.combatant(combat.turn()).name.clone();
        let outcome = combat
            .take_turn(move_index)
            .with_context(|| format!("{attacker} could not use move {move_index}"))?;
        match outcome {
            TurnOutcome::Missed { hit_roll } => {
                println!("turn {}: {attacker} missed (roll {hit_roll})", combat.turn_count());
            }
            TurnOutcome::Hit {
                damage,
                defender_health,
                ..
            } => {
                println!(
                    "turn {}: {attacker} hit for {damage}, defender at {defender_health}",
                    combat.turn_count()
                );
            }
        }
    }
    if let Ok(winner) = combat.winner() {
        println!("winner: {}", winner.name);
    }

    let rendered = serde_json::to_string_pretty(&combat.to_snapshot())?;
    println!("{rendered}");
    if let Some(path) = &opts.snapshot_path {
        std::fs::write(path, &rendered)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    }
    Ok(())
}

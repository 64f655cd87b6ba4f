use crate::combat::{Combat, Turn};
use crate::error::CombatError;
use crate::model::EncounterFile;
use crate::random::SeededRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport {
    pub runs: usize,
    pub one_wins: usize,
    pub two_wins: usize,
    pub undecided: usize,
    pub average_turns: f64,
}

impl BatchReport {
    pub fn win_rate_one(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.one_wins as f64 / self.runs as f64
    }
}

struct RunResult {
    winner: Option<Turn>,
    turns: u32,
}

pub fn run_batch(
    encounter: &EncounterFile,
    script: &[usize],
    runs: usize,
    seed: u64,
    max_turns: u32,
) -> Result<BatchReport, CombatError> {
    let mut seeder = SmallRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..runs).map(|_| seeder.gen()).collect();

    let results: Vec<RunResult> = seeds
        .par_iter()
        .map(|&run_seed| play_scripted(encounter, script, run_seed, max_turns))
        .collect::<Result<_, _>>()?;

    let mut report = BatchReport {
        runs,
        one_wins: 0,
        two_wins: 0,
        undecided: 0,
        average_turns: 0.0,
    };
    let mut total_turns = 0u64;
    for result in &results {
        match result.winner {
            Some(Turn::One) => report.one_wins += 1,
            Some(Turn::Two) => report.two_wins += 1,
            None => report.undecided += 1,
        }
        total_turns += result.turns as u64;
    }
    if runs > 0 {
        report.average_turns = total_turns as f64 / runs as f64;
    }
    tracing::info!(
        "batch of {} runs: {} / {} / {} undecided",
        runs,
        report.one_wins,
        report.two_wins,
        report.undecided
    );
    Ok(report)
}

fn play_scripted(
    encounter: &EncounterFile,
    script: &[usize],
    seed: u64,
    max_turns: u32,
) -> Result<RunResult, CombatError> {
    let mut one = encounter.combatant_one.clone();
    let mut two = encounter.combatant_two.clone();
    let mut combat = Combat::new(&mut one, &mut two, SeededRandom::new(seed));
    let mut moves = script.iter().cycle();
    while combat.turn_count() < max_turns && !combat.is_winner_decided() {
        let Some(&move_index) = moves.next() else {
            break;
        };
        combat.take_turn(move_index)?;
    }
    Ok(RunResult {
        winner: combat.winner_side().ok(),
        turns: combat.turn_count(),
    })
}

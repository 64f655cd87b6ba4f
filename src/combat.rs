use crate::damage;
use crate::error::CombatError;
use crate::model::Combatant;
use crate::random::RandomSource;
use crate::snapshot::CombatSnapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    One,
    Two,
}

impl Turn {
    pub fn other(self) -> Turn {
        match self {
            Turn::One => Turn::Two,
            Turn::Two => Turn::One,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TurnOutcome {
    Missed {
        hit_roll: u32,
    },
    Hit {
        damage: u32,
        defender_health: i64,
        knocked_out: bool,
    },
}

const HIT_ROLL_MIN: u32 = 1;
const HIT_ROLL_MAX: u32 = 100;

pub struct Combat<'a, R: RandomSource> {
    combatant_one: &'a mut Combatant,
    combatant_two: &'a mut Combatant,
    random: R,
    turn: Turn,
    turn_count: u32,
    id: String,
    winner_decided: bool,
}

impl<'a, R: RandomSource> Combat<'a, R> {
    pub fn new(
        combatant_one: &'a mut Combatant,
        combatant_two: &'a mut Combatant,
        random: R,
    ) -> Self {
        Self::with_id(
            combatant_one,
            combatant_two,
            random,
            Uuid::new_v4().to_string(),
        )
    }

    pub fn with_id(
        combatant_one: &'a mut Combatant,
        combatant_two: &'a mut Combatant,
        random: R,
        id: impl Into<String>,
    ) -> Self {
        Self {
            combatant_one,
            combatant_two,
            random,
            turn: Turn::One,
            turn_count: 0,
            id: id.into(),
            winner_decided: false,
        }
    }

    // Errors leave the encounter untouched, so an invalid index does not
    // consume the turn.
    pub fn take_turn(&mut self, move_index: usize) -> Result<TurnOutcome, CombatError> {
        if self.winner_decided {
            return Err(CombatError::AlreadyDecided);
        }

        tracing::info!("[{}] turn {}", self.id, self.turn_count);

        let (attacker, defender) = match self.turn {
            Turn::One => (&*self.combatant_one, &mut *self.combatant_two),
            Turn::Two => (&*self.combatant_two, &mut *self.combatant_one),
        };
        let move_def = attacker
            .moves
            .get(move_index)
            .ok_or(CombatError::InvalidMove {
                index: move_index,
                available: attacker.moves.len(),
            })?;
        tracing::info!("[{}] attacker is {}", self.id, attacker.name);
        tracing::info!("[{}] defender is {}", self.id, defender.name);

        self.turn_count += 1;
        self.turn = self.turn.other();

        let hit_roll = self.random.roll(HIT_ROLL_MIN, HIT_ROLL_MAX);
        if hit_roll > move_def.accuracy as u32 {
            tracing::info!(
                "[{}] {} missed (rolled {} against accuracy {})",
                self.id,
                attacker.name,
                hit_roll,
                move_def.accuracy
            );
            return Ok(TurnOutcome::Missed { hit_roll });
        }

        let damage = damage::calculate_damage(
            attacker.level,
            attacker.attack,
            move_def.damage,
            defender.defence,
            &mut self.random,
        );
        tracing::info!("[{}] damage is {}", self.id, damage);
        defender.health = defender.health.saturating_sub(damage as i64);
        tracing::info!("[{}] {} health is now {}", self.id, defender.name, defender.health);

        let knocked_out = defender.is_knocked_out();
        if knocked_out {
            self.winner_decided = true;
            tracing::info!("[{}] {} wins after {} turns", self.id, attacker.name, self.turn_count);
        }
        Ok(TurnOutcome::Hit {
            damage,
            defender_health: defender.health,
            knocked_out,
        })
    }

    pub fn calculate_damage(
        &mut self,
        attacker_level: u32,
        attacker_attack: u32,
        move_damage: u32,
        defender_defence: u32,
    ) -> u32 {
        damage::calculate_damage(
            attacker_level,
            attacker_attack,
            move_damage,
            defender_defence,
            &mut self.random,
        )
    }

    pub fn combatant_one(&self) -> &Combatant {
        &*self.combatant_one
    }

    pub fn combatant_two(&self) -> &Combatant {
        &*self.combatant_two
    }

    pub fn combatant(&self, side: Turn) -> &Combatant {
        match side {
            Turn::One => &*self.combatant_one,
            Turn::Two => &*self.combatant_two,
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_winner_decided(&self) -> bool {
        self.winner_decided
    }

    /// The side still standing, read from live health.
    ///
    /// Combatant one wins whenever its health is at least 1, so a double
    /// knockout reports combatant two.
    pub fn winner(&self) -> Result<&Combatant, CombatError> {
        self.winner_side().map(|side| self.combatant(side))
    }

    pub fn winner_side(&self) -> Result<Turn, CombatError> {
        if !self.winner_decided {
            return Err(CombatError::NotDecided);
        }
        if self.combatant_one.health >= 1 {
            Ok(Turn::One)
        } else {
            Ok(Turn::Two)
        }
    }

    pub fn to_snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            combatant_one: self.combatant_one.clone(),
            combatant_two: self.combatant_two.clone(),
            turn: self.turn,
            turns: self.turn_count,
            id: self.id.clone(),
            winner: self.winner().ok().cloned(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.to_snapshot().to_json()
    }

    /// Restores turn, turn count, id and the decided flag.
    ///
    /// Combatant fields are left alone; use
    /// [`CombatSnapshot::restore_combatants`] before building the engine.
    pub fn set_state_from_snapshot(&mut self, snapshot: &CombatSnapshot) {
        self.turn = snapshot.turn;
        self.turn_count = snapshot.turns;
        self.id.clone_from(&snapshot.id);
        self.winner_decided = snapshot.is_decided();
    }

    pub fn set_state_from_json(
        &mut self,
        value: &serde_json::Value,
    ) -> Result<(), serde_json::Error> {
        let snapshot = CombatSnapshot::from_json(value)?;
        self.set_state_from_snapshot(&snapshot);
        Ok(())
    }
}

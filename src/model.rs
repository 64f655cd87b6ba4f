use serde::{Deserialize, Serialize};

fn default_accuracy() -> u8 {
    100
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    #[serde(default)]
    pub damage: u32,
}

impl Move {
    pub fn new(name: impl Into<String>, accuracy: u8, damage: u32) -> Self {
        Move {
            name: name.into(),
            accuracy,
            damage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub attack: u32,
    pub defence: u32,
    // Goes negative on overkill; never clamped.
    pub health: i64,
    pub moves: Vec<Move>,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        level: u32,
        attack: u32,
        defence: u32,
        health: i64,
        moves: Vec<Move>,
    ) -> Self {
        Combatant {
            name: name.into(),
            level,
            attack,
            defence,
            health,
            moves,
        }
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health < 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterFile {
    pub combatant_one: Combatant,
    pub combatant_two: Combatant,
}

pub fn validate_combatant(combatant: &Combatant) -> anyhow::Result<()> {
    if combatant.moves.is_empty() {
        anyhow::bail!("{} must know at least one move", combatant.name);
    }
    if combatant.level == 0 || combatant.attack == 0 || combatant.defence == 0 {
        anyhow::bail!(
            "{} needs positive level, attack and defence (got {}/{}/{})",
            combatant.name,
            combatant.level,
            combatant.attack,
            combatant.defence
        );
    }
    if let Some(mv) = combatant.moves.iter().find(|mv| mv.accuracy > 100) {
        anyhow::bail!(
            "{}: move '{}' has accuracy {} (expected 0..=100)",
            combatant.name,
            mv.name,
            mv.accuracy
        );
    }
    Ok(())
}

pub fn validate_encounter(encounter: &EncounterFile) -> anyhow::Result<()> {
    validate_combatant(&encounter.combatant_one)?;
    validate_combatant(&encounter.combatant_two)?;
    Ok(())
}

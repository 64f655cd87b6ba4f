use crate::combat::Turn;
use crate::model::Combatant;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatSnapshot {
    pub combatant_one: Combatant,
    pub combatant_two: Combatant,
    pub turn: Turn,
    pub turns: u32,
    pub id: String,
    #[serde(default, with = "winner_sentinel")]
    pub winner: Option<Combatant>,
}

impl CombatSnapshot {
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Copies the exported combatant state back onto live combatants.
    ///
    /// `Combat::set_state_from_snapshot` only restores the engine scalars, so
    /// this has to run first when resuming an encounter.
    pub fn restore_combatants(&self, one: &mut Combatant, two: &mut Combatant) {
        one.clone_from(&self.combatant_one);
        two.clone_from(&self.combatant_two);
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Plain structs with string keys cannot fail to serialize.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

// An undecided encounter is written as `"winner": false`.
mod winner_sentinel {
    use crate::model::Combatant;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        winner: &Option<Combatant>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match winner {
            Some(combatant) => combatant.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sentinel {
        Decided(Combatant),
        Flag(bool),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Combatant>, D::Error> {
        match Option::<Sentinel>::deserialize(deserializer)? {
            Some(Sentinel::Decided(combatant)) => Ok(Some(combatant)),
            Some(Sentinel::Flag(false)) | None => Ok(None),
            Some(Sentinel::Flag(true)) => Err(D::Error::custom(
                "winner must be false or the winning combatant",
            )),
        }
    }
}

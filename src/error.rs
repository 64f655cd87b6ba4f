use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("the encounter already has a winner")]
    AlreadyDecided,

    #[error("move index {index} out of range ({available} moves available)")]
    InvalidMove { index: usize, available: usize },

    #[error("the encounter has no winner yet")]
    NotDecided,
}

use thiserror::Error;

/// Errors surfaced by the environment and agent
///
/// Every failure is returned to the caller immediately. Nothing is retried or
/// clamped internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("action index {0} is out of range (expected 0..4)")]
    InvalidAction(usize),

    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),

    #[error("mine probability must be within [0, 1], got {0}")]
    MineProbability(f64),

    #[error("step called before reset")]
    NotReset,

    #[error("state index {state} is out of range for a table of {states} states")]
    StateOutOfRange { state: usize, states: usize },

    #[error("invalid decay parameters: {0}")]
    Decay(String),
}

pub type Result<T> = std::result::Result<T, Error>;

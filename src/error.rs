//! Error taxonomy for the state-update API. `decide()` never returns one of
//! these: on any internally detectable inconsistency it falls back to a safe
//! Fold instead (see [`crate::policy`]).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PokerError {
    #[error("invalid card: {0}")]
    InvalidCard(String),

    #[error("inconsistent table state: {0}")]
    InconsistentState(String),

    #[error("parameter out of range: {0}")]
    OutOfRangeParameter(String),
}

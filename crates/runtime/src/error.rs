//! Unified error type surfaced by the runtime API.
//!
//! Rule violations come straight from `combat-core`; the remaining variants
//! cover session setup.
use thiserror::Error;

use combat_core::{CombatError, FailureReport, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("session requires a template oracle before building")]
    MissingOracle,

    #[error("party must contain at least one hero")]
    EmptyParty,

    #[error("unknown hero template '{0}'")]
    UnknownHero(String),
}

impl RuntimeError {
    /// The rule violation behind this error, if any.
    pub fn combat(&self) -> Option<&CombatError> {
        match self {
            Self::Combat(err) => Some(err),
            _ => None,
        }
    }

    /// Structured failure record for rule violations.
    pub fn failure(&self) -> Option<FailureReport> {
        self.combat().map(CombatError::failure)
    }

    pub fn is_recoverable(&self) -> bool {
        self.combat()
            .is_some_and(|err| err.severity().is_recoverable())
    }
}

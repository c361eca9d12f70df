//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`DiceError`, `CardError`) live next to the code
//! that produces them. [`CombatError`] covers the public action API and is
//! what the orchestrator hands back to callers.
//!
//! # Design Principles
//!
//! - **Type Safety**: each failure mode is its own variant with the ids involved
//! - **Classification**: every error maps to an [`ErrorKind`] and [`ErrorSeverity`]
//! - **Non-destructive**: an error is always returned before any state mutation

use crate::participant::ParticipantId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: not enough action points, illegal target
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: card not in hand, unknown template
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: selection action without a pending card
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Broad error category surfaced to presentation collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// The request is not allowed in the current state (unaffordable card, illegal target).
    InvalidAction,
    /// Template or card data required by the request could not be found.
    MissingData,
    /// The request does not match the current mode (no pending selection, wrong phase).
    InconsistentState,
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the category of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors returned by the public combat action API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("a combat is already active; force a reset to start another")]
    CombatAlreadyActive,

    #[error("no combat is active")]
    CombatNotActive,

    #[error("no participant is currently active")]
    NoActiveParticipant,

    #[error("card '{card}' is not in the hand of {hero}")]
    CardNotInHand { hero: ParticipantId, card: String },

    #[error("card costs {required} action points but only {available} remain")]
    InsufficientActionPoints { required: u32, available: u32 },

    #[error("{target} is not a legal target for card '{card}'")]
    IllegalTarget { card: String, target: ParticipantId },

    #[error("card '{card}' needs a target")]
    TargetRequired { card: String },

    #[error("no card is waiting for a target")]
    NoPendingSelection,

    #[error("the enemy phase is not in progress")]
    NotEnemyPhase,

    #[error("none of the requested enemy templates could be resolved")]
    NoEnemiesResolved,

    #[error("no hero is able to take part in combat")]
    NoHeroesAvailable,

    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientActionPoints { .. } | Self::IllegalTarget { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::NoPendingSelection | Self::NotEnemyPhase | Self::CombatNotActive => {
                ErrorSeverity::Internal
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::CombatAlreadyActive
            | Self::NoActiveParticipant
            | Self::CardNotInHand { .. }
            | Self::InsufficientActionPoints { .. }
            | Self::IllegalTarget { .. }
            | Self::TargetRequired { .. }
            | Self::UnknownParticipant(_)
            | Self::NoHeroesAvailable => ErrorKind::InvalidAction,
            Self::NoEnemiesResolved => ErrorKind::MissingData,
            Self::CombatNotActive | Self::NoPendingSelection | Self::NotEnemyPhase => {
                ErrorKind::InconsistentState
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatAlreadyActive => "combat_already_active",
            Self::CombatNotActive => "combat_not_active",
            Self::NoActiveParticipant => "no_active_participant",
            Self::CardNotInHand { .. } => "card_not_in_hand",
            Self::InsufficientActionPoints { .. } => "insufficient_action_points",
            Self::IllegalTarget { .. } => "illegal_target",
            Self::TargetRequired { .. } => "target_required",
            Self::NoPendingSelection => "no_pending_selection",
            Self::NotEnemyPhase => "not_enemy_phase",
            Self::NoEnemiesResolved => "no_enemies_resolved",
            Self::NoHeroesAvailable => "no_heroes_available",
            Self::UnknownParticipant(_) => "unknown_participant",
        }
    }
}

impl CombatError {
    /// Structured failure record for collaborators that only speak in payloads.
    pub fn failure(&self) -> FailureReport {
        FailureReport {
            success: false,
            error_kind: self.kind(),
            code: self.error_code(),
        }
    }
}

/// Serializable `{success: false, error_kind}` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FailureReport {
    pub success: bool,
    pub error_kind: ErrorKind,
    pub code: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_report_carries_kind_and_code() {
        let err = CombatError::InsufficientActionPoints {
            required: 3,
            available: 1,
        };
        let report = err.failure();

        assert!(!report.success);
        assert_eq!(report.error_kind, ErrorKind::InvalidAction);
        assert_eq!(report.code, "insufficient_action_points");
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn selection_guards_are_inconsistent_state() {
        assert_eq!(
            CombatError::NoPendingSelection.kind(),
            ErrorKind::InconsistentState
        );
        assert_eq!(CombatError::NoEnemiesResolved.kind(), ErrorKind::MissingData);
    }
}

//! Events emitted while a combat runs.
//!
//! The engine pushes [`CombatEvent`]s into an [`EventSink`] as it mutates
//! state; the runtime forwards them to subscribers. Every payload is built
//! from snapshots and ids, never from live participants.

use crate::card::TargetMode;
use crate::engine::EnemyTurnOutcome;
use crate::env::Rewards;
use crate::participant::{ParticipantId, ParticipantSnapshot, SkipReason, TickResult};
use crate::resolver::EffectResult;
use crate::state::{CombatPhase, Outcome};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "payload", rename_all = "snake_case")
)]
pub enum CombatEvent {
    CombatStarted {
        heroes: Vec<ParticipantSnapshot>,
        enemies: Vec<ParticipantSnapshot>,
    },
    TurnStarted {
        phase: CombatPhase,
        active_id: Option<ParticipantId>,
        round: u32,
    },
    TurnSkipped {
        id: ParticipantId,
        reason: SkipReason,
    },
    StatusTicked {
        id: ParticipantId,
        results: Vec<TickResult>,
    },
    CardUsed {
        card: String,
        user: ParticipantId,
        target: ParticipantId,
        results: Vec<EffectResult>,
    },
    AreaCardUsed {
        card: String,
        user: ParticipantId,
        results: Vec<EffectResult>,
    },
    RoundStarted {
        round: u32,
    },
    EnemyPhaseStarted {
        round: u32,
    },
    EnemyTurnResult(EnemyTurnOutcome),
    ModeTargetSelection {
        card: String,
        target_mode: TargetMode,
        legal_targets: Vec<ParticipantId>,
    },
    SelectionCancelled {
        card: String,
    },
    CombatEnded {
        outcome: Outcome,
        rounds: u32,
        rewards_summary: Option<Rewards>,
    },
}

impl CombatEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CombatStarted { .. } => "combat_started",
            Self::TurnStarted { .. } => "turn_started",
            Self::TurnSkipped { .. } => "turn_skipped",
            Self::StatusTicked { .. } => "status_ticked",
            Self::CardUsed { .. } => "card_used",
            Self::AreaCardUsed { .. } => "area_card_used",
            Self::RoundStarted { .. } => "round_started",
            Self::EnemyPhaseStarted { .. } => "enemy_phase_started",
            Self::EnemyTurnResult(_) => "enemy_turn_result",
            Self::ModeTargetSelection { .. } => "mode_target_selection",
            Self::SelectionCancelled { .. } => "selection_cancelled",
            Self::CombatEnded { .. } => "combat_ended",
        }
    }
}

/// Receives events as the engine produces them.
pub trait EventSink {
    fn emit(&mut self, event: CombatEvent);
}

impl EventSink for Vec<CombatEvent> {
    fn emit(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

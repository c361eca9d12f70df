use crate::participant::ParticipantId;

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Phase of the combat state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatPhase {
    /// No combat has started yet (or the last one was reset).
    #[default]
    Init,
    HeroPhase,
    EnemyPhase,
    CombatOver(Outcome),
}

impl CombatPhase {
    /// True while a combat is being fought.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::HeroPhase | Self::EnemyPhase)
    }
}

/// Turn bookkeeping for one combat.
///
/// `turn_index` always indexes into `ordered_hero_ids` (it stays on the
/// last hero that acted once the hero phase is exhausted), and `active` is
/// `Some` only while a hero is taking its turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub round: u32,
    pub phase: CombatPhase,
    pub turn_index: usize,
    pub ordered_hero_ids: Vec<ParticipantId>,
    pub active: Option<ParticipantId>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all bookkeeping back to [`CombatPhase::Init`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            CombatPhase::CombatOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

use std::fmt;

/// Unique identifier for any participant tracked in a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    /// First identifier handed to enemies built for a combat.
    ///
    /// Heroes are numbered from 1 in party order and keep their ids across
    /// combats; enemies are renumbered from this base on every start.
    pub const ENEMY_BASE: u32 = 1_000;

    pub const fn hero(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    pub const fn enemy(index: usize) -> Self {
        Self(Self::ENEMY_BASE + index as u32)
    }

    /// Returns true if this id lies in the enemy range.
    #[inline]
    pub const fn is_enemy(self) -> bool {
        self.0 >= Self::ENEMY_BASE
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the encounter a participant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Heroes,
    Enemies,
}

/// Per-combat running totals kept on every participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTotals {
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub healing_done: u32,
}

impl CombatTotals {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

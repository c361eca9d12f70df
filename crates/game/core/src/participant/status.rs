//! Status effect system for participants.
//!
//! Status effects are turn-counted conditions: damage over time, crowd
//! control, marks and taunts. A participant holds at most one effect per
//! kind; re-applying a kind keeps whichever instance lasts longer.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::participant::ParticipantId;

/// Types of status effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    Poisoned,
    Burning,
    Bleeding,

    // ========================================================================
    // Crowd control
    // ========================================================================
    /// Hard control: cannot act.
    Frozen,
    /// Hard control: cannot act.
    Paralyzed,
    /// Soft control: loses the action on a coin flip, re-rolled every check.
    Feared,

    // ========================================================================
    // Marks
    // ========================================================================
    /// Takes bonus damage from every hit.
    Marked,
    /// Enemy AI must target the provoking participant while it remains legal.
    Provoked,
    /// Outgoing damage reduced by magnitude.
    Weakened,
}

impl StatusKind {
    /// Control effects that always prevent acting.
    pub const fn is_hard_control(self) -> bool {
        matches!(self, Self::Frozen | Self::Paralyzed)
    }
}

/// A single status effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns left; the effect is removed when this reaches 0.
    pub remaining: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub periodic_damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Option<u32>,
    /// Participant that applied the effect (provoke, mark).
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Option<ParticipantId>,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, remaining: u32) -> Self {
        Self {
            kind,
            remaining,
            periodic_damage: None,
            magnitude: None,
            origin: None,
        }
    }

    pub fn with_periodic_damage(mut self, damage: u32) -> Self {
        self.periodic_damage = Some(damage);
        self
    }

    pub fn with_magnitude(mut self, magnitude: u32) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_origin(mut self, origin: ParticipantId) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// What a single entry of a status tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "source", rename_all = "snake_case"))]
pub enum TickSource {
    /// Passive or buff-driven regeneration.
    Regeneration,
    /// Damage from a periodic status.
    Periodic { kind: StatusKind },
    /// A status ran out and was removed.
    Expired { kind: StatusKind },
}

/// Ordered log entry returned by a status tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickResult {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub source: TickSource,
    pub amount: u32,
}

/// Active status effects on a participant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds a status effect, merging with an existing one of the same kind.
    ///
    /// The instance with the longer remaining duration is kept; magnitudes never
    /// stack. Returns false if the effect was dropped (zero duration or full set).
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        if effect.remaining == 0 {
            return false;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            if effect.remaining > existing.remaining {
                *existing = effect;
            }
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Removes every effect and returns how many were active.
    pub fn clear(&mut self) -> usize {
        let count = self.effects.len();
        self.effects.clear();
        count
    }

    /// Periodic damage entries in application order.
    pub fn periodic(&self) -> Vec<(StatusKind, u32)> {
        self.effects
            .iter()
            .filter_map(|e| e.periodic_damage.map(|dmg| (e.kind, dmg)))
            .collect()
    }

    /// Decrements every duration by one and removes the expired effects.
    ///
    /// Returns the kinds that expired, in list order.
    pub fn decrement(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    /// Returns the first hard-control effect, if any.
    pub fn hard_control(&self) -> Option<StatusKind> {
        self.effects
            .iter()
            .map(|e| e.kind)
            .find(|kind| kind.is_hard_control())
    }

    pub fn magnitude(&self, kind: StatusKind) -> Option<u32> {
        self.get(kind).and_then(|e| e.magnitude)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

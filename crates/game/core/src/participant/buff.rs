//! Hero buffs, kept apart from debuff statuses.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BuffKind {
    /// Adds magnitude to card damage.
    Attack,
    /// Adds magnitude to defense.
    Defense,
    /// Magnitude is the percent chance to evade an enemy attack.
    Evasion,
    /// Heals magnitude at every status tick.
    Regeneration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub kind: BuffKind,
    pub magnitude: u32,
    pub remaining: u32,
}

impl Buff {
    pub fn new(kind: BuffKind, magnitude: u32, remaining: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buffs {
    buffs: ArrayVec<Buff, { CombatConfig::MAX_BUFFS }>,
}

impl Buffs {
    pub fn empty() -> Self {
        Self {
            buffs: ArrayVec::new(),
        }
    }

    /// Merge by kind; the longer duration wins.
    pub fn apply(&mut self, buff: Buff) -> bool {
        if buff.remaining == 0 {
            return false;
        }
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.kind == buff.kind) {
            if buff.remaining > existing.remaining {
                *existing = buff;
            }
            return true;
        }
        self.buffs.try_push(buff).is_ok()
    }

    /// Sum of magnitudes for a kind (0 when absent).
    pub fn total(&self, kind: BuffKind) -> u32 {
        self.buffs
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.magnitude)
            .sum()
    }

    pub fn has(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.kind == kind)
    }

    pub fn decrement(&mut self) {
        for buff in self.buffs.iter_mut() {
            buff.remaining = buff.remaining.saturating_sub(1);
        }
        self.buffs.retain(|b| b.remaining > 0);
    }

    pub fn clear(&mut self) {
        self.buffs.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}

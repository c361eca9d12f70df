//! Template data for heroes and enemies.

use crate::participant::{AiPriority, DamageType, EnemyAttack};

/// Base stats shared by hero and enemy templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub hp_max: u32,
    /// Starting hp; defaults to `hp_max`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pa_max: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen: Option<u32>,
}

impl StatBlock {
    pub fn new(hp_max: u32, attack: u32, defense: u32) -> Self {
        Self {
            hp_max,
            hp: None,
            attack,
            defense,
            pa_max: None,
            regen: None,
        }
    }

    pub fn with_regen(mut self, regen: u32) -> Self {
        self.regen = Some(regen);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroTemplate {
    pub id: String,
    pub name: String,
    pub class: String,
    pub stats: StatBlock,
    /// Card ids dealt to the hero. Empty means every card of the hero's class.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hand: Vec<String>,
}

impl HeroTemplate {
    pub const DEFAULT_PA_MAX: u32 = 3;

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: impl Into<String>,
        stats: StatBlock,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class: class.into(),
            stats,
            hand: Vec::new(),
        }
    }
}

/// Experience and gold granted when the enemy is defeated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: u32,
}

impl Rewards {
    pub fn add(self, other: Rewards) -> Rewards {
        Rewards {
            xp: self.xp.saturating_add(other.xp),
            gold: self.gold.saturating_add(other.gold),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attacks: Vec<EnemyAttack>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vulnerabilities: Vec<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Vec<DamageType>,
    /// Number of phases for bosses; absent or 1 means a regular enemy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss_phases: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai_priority: AiPriority,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: Rewards,
}

impl EnemyTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            attacks: Vec::new(),
            vulnerabilities: Vec::new(),
            resistances: Vec::new(),
            boss_phases: None,
            ai_priority: AiPriority::default(),
            rewards: Rewards::default(),
        }
    }
}

/// One requested enemy in an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositionEntry {
    pub template_id: String,
    /// Opaque anchor name forwarded to presentation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub placement: Option<String>,
}

impl CompositionEntry {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            placement: None,
        }
    }

    pub fn at(mut self, placement: impl Into<String>) -> Self {
        self.placement = Some(placement.into());
        self
    }
}

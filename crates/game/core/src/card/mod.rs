//! Card definitions.
//!
//! [`CardDefinition`] is the raw shape content files deserialize into.
//! [`Card`] is the validated form the resolver consumes; conversion happens
//! once, at the load boundary, through `Card::try_from`.

mod effect;

pub use effect::{
    BuffSpec, CardEffect, ConditionalSpec, CriticalSpec, DamageSpec, DebuffSpec, EffectKind,
    EffectSpec, HealSpec, Predicate,
};

use crate::participant::StatusKind;

/// How a card selects its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetMode {
    /// The caster only.
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
    /// One standing hero (the caster included).
    Ally,
    /// One knocked-out hero.
    IncapacitatedAlly,
    /// One enemy still in the fight.
    Enemy,
    /// Every enemy still in the fight.
    AllEnemies,
    /// Every standing hero.
    AllAllies,
}

impl TargetMode {
    /// Returns true if the card hits every legal target at once.
    pub const fn is_area(self) -> bool {
        matches!(self, Self::AllEnemies | Self::AllAllies)
    }

    /// Returns true if the card resolves without a target selection step.
    pub const fn resolves_immediately(self) -> bool {
        matches!(self, Self::SelfOnly | Self::AllEnemies | Self::AllAllies)
    }
}

/// Errors raised while validating card data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CardError {
    #[error("card declares no effects")]
    EmptyEffects,

    #[error("effect '{0}' is declared more than once")]
    DuplicateEffect(&'static str),

    #[error("'{0}' modifier requires a damage effect")]
    ModifierWithoutDamage(&'static str),

    #[error("{field} must be within 1..=100 (got {value})")]
    InvalidPercent { field: &'static str, value: u32 },

    #[error("critical multiplier must be a finite value >= 1 (got {0})")]
    InvalidMultiplier(f32),

    #[error("{0} duration must be at least one turn")]
    ZeroDuration(&'static str),

    #[error("status '{0}' requires a magnitude")]
    MissingMagnitude(StatusKind),

    #[error("card '{card}': {source}")]
    InCard {
        card: String,
        #[source]
        source: Box<CardError>,
    },
}

/// Card as declared by content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub owner_class: String,
    pub pa_cost: u32,
    pub target_mode: TargetMode,
    pub effects: Vec<CardEffect>,
}

/// Validated card ready for resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub owner_class: String,
    pub pa_cost: u32,
    pub target_mode: TargetMode,
    pub effects: EffectSpec,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        owner_class: impl Into<String>,
        pa_cost: u32,
        target_mode: TargetMode,
        effects: &[CardEffect],
    ) -> Result<Self, CardError> {
        let id = id.into();
        let effects = EffectSpec::from_effects(effects).map_err(|source| CardError::InCard {
            card: id.clone(),
            source: Box::new(source),
        })?;
        Ok(Self {
            name: id.clone(),
            id,
            owner_class: owner_class.into(),
            pa_cost,
            target_mode,
            effects,
        })
    }
}

impl TryFrom<CardDefinition> for Card {
    type Error = CardError;

    fn try_from(def: CardDefinition) -> Result<Self, Self::Error> {
        let mut card = Card::new(
            def.id,
            def.owner_class,
            def.pa_cost,
            def.target_mode,
            &def.effects,
        )?;
        if let Some(name) = def.name {
            card.name = name;
        }
        Ok(card)
    }
}

//! Card effect variants and the validated per-card effect set.
//!
//! Content declares effects as a list of tagged [`CardEffect`] values. At the
//! load boundary that list is folded into an [`EffectSpec`], which holds at
//! most one effect per kind and rejects combinations the resolver cannot
//! apply (a critical or conditional modifier without damage, percentages out
//! of range, durations of zero).

use crate::participant::{Buff, BuffKind, DamageType, ParticipantId, StatusEffect, StatusKind};
use crate::resolver::Dice;

use super::CardError;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSpec {
    pub base: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dice: Option<Dice>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealSpec {
    pub base: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dice: Option<Dice>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffSpec {
    pub kind: BuffKind,
    pub magnitude: u32,
    pub duration: u32,
}

impl BuffSpec {
    pub fn to_buff(self) -> Buff {
        Buff::new(self.kind, self.magnitude, self.duration)
    }
}

/// Status applied by a card or an enemy attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffSpec {
    pub kind: StatusKind,
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub periodic_damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Option<u32>,
}

impl DebuffSpec {
    pub fn new(kind: StatusKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            periodic_damage: None,
            magnitude: None,
        }
    }

    /// Builds the status instance. Provoke and mark remember who applied them.
    pub fn to_effect(self, origin: ParticipantId) -> StatusEffect {
        let mut effect = StatusEffect::new(self.kind, self.duration);
        effect.periodic_damage = self.periodic_damage;
        effect.magnitude = self.magnitude;
        if matches!(self.kind, StatusKind::Provoked | StatusKind::Marked) {
            effect.origin = Some(origin);
        }
        effect
    }

    pub fn validate(&self) -> Result<(), CardError> {
        if self.duration == 0 {
            return Err(CardError::ZeroDuration("debuff"));
        }
        if self.kind == StatusKind::Weakened && self.magnitude.is_none() {
            return Err(CardError::MissingMagnitude(self.kind));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalSpec {
    pub chance_percent: u32,
    pub multiplier: f32,
}

/// Predicates recognised by conditional damage bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Predicate {
    /// Target hp is below the configured share of its maximum (30% by default).
    TargetHpBelowThreshold,
    /// Target carries a mark.
    TargetMarked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalSpec {
    pub predicate: Predicate,
    pub bonus: u32,
}

/// One effect entry as declared by content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardEffect {
    Damage(DamageSpec),
    Heal(HealSpec),
    Shield { amount: u32 },
    Buff(BuffSpec),
    Debuff(DebuffSpec),
    Critical(CriticalSpec),
    Conditional(ConditionalSpec),
    Cleanse,
    Revive { hp_percent: u32 },
}

impl CardEffect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Damage(_) => "damage",
            Self::Heal(_) => "heal",
            Self::Shield { .. } => "shield",
            Self::Buff(_) => "buff",
            Self::Debuff(_) => "debuff",
            Self::Critical(_) => "critical",
            Self::Conditional(_) => "conditional",
            Self::Cleanse => "cleanse",
            Self::Revive { .. } => "revive",
        }
    }
}

/// Kinds of effects that produce result records, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectKind {
    Damage,
    Heal,
    Revive,
    Shield,
    Buff,
    Debuff,
    Cleanse,
}

/// Validated effect set: at most one slot per kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectSpec {
    pub damage: Option<DamageSpec>,
    pub heal: Option<HealSpec>,
    pub revive: Option<u32>,
    pub shield: Option<u32>,
    pub buff: Option<BuffSpec>,
    pub debuff: Option<DebuffSpec>,
    pub critical: Option<CriticalSpec>,
    pub conditional: Option<ConditionalSpec>,
    pub cleanse: bool,
}

impl EffectSpec {
    /// Folds declared effects into a validated set.
    pub fn from_effects(effects: &[CardEffect]) -> Result<Self, CardError> {
        if effects.is_empty() {
            return Err(CardError::EmptyEffects);
        }

        let mut spec = Self::default();
        for effect in effects {
            let duplicate = match effect {
                CardEffect::Damage(damage) => spec.damage.replace(damage.clone()).is_some(),
                CardEffect::Heal(heal) => spec.heal.replace(heal.clone()).is_some(),
                CardEffect::Shield { amount } => spec.shield.replace(*amount).is_some(),
                CardEffect::Buff(buff) => {
                    if buff.duration == 0 {
                        return Err(CardError::ZeroDuration("buff"));
                    }
                    spec.buff.replace(*buff).is_some()
                }
                CardEffect::Debuff(debuff) => {
                    debuff.validate()?;
                    spec.debuff.replace(*debuff).is_some()
                }
                CardEffect::Critical(critical) => {
                    if critical.chance_percent > 100 {
                        return Err(CardError::InvalidPercent {
                            field: "critical.chance_percent",
                            value: critical.chance_percent,
                        });
                    }
                    if !critical.multiplier.is_finite() || critical.multiplier < 1.0 {
                        return Err(CardError::InvalidMultiplier(critical.multiplier));
                    }
                    spec.critical.replace(*critical).is_some()
                }
                CardEffect::Conditional(conditional) => {
                    spec.conditional.replace(*conditional).is_some()
                }
                CardEffect::Cleanse => std::mem::replace(&mut spec.cleanse, true),
                CardEffect::Revive { hp_percent } => {
                    if *hp_percent == 0 || *hp_percent > 100 {
                        return Err(CardError::InvalidPercent {
                            field: "revive.hp_percent",
                            value: *hp_percent,
                        });
                    }
                    spec.revive.replace(*hp_percent).is_some()
                }
            };

            if duplicate {
                return Err(CardError::DuplicateEffect(effect.name()));
            }
        }

        if spec.damage.is_none() {
            if spec.critical.is_some() {
                return Err(CardError::ModifierWithoutDamage("critical"));
            }
            if spec.conditional.is_some() {
                return Err(CardError::ModifierWithoutDamage("conditional"));
            }
        }

        Ok(spec)
    }
}

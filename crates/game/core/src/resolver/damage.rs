use crate::card::{ConditionalSpec, CriticalSpec, DamageSpec, HealSpec, Predicate};
use crate::config::CombatConfig;
use crate::participant::{CombatParticipant, ParticipantId};
use crate::rng::RngSource;

/// Caster values captured before any target is mutated.
///
/// A self-targeting card borrows the caster mutably as its own target, so the
/// resolver reads everything it needs from the caster up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CasterProfile {
    pub id: ParticipantId,
    pub attack: u32,
    pub attack_bonus: u32,
    pub weakness: u32,
}

impl CasterProfile {
    pub fn of<P: CombatParticipant + ?Sized>(caster: &P) -> Self {
        Self {
            id: caster.id(),
            attack: caster.attack(),
            attack_bonus: caster.attack_bonus(),
            weakness: caster.weakness(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageRoll {
    pub amount: u32,
    pub critical: bool,
}

/// Rolls outgoing damage for one target.
///
/// base + dice + attack + attack buffs, reduced by weakness and floored at
/// 0; the critical multiplier applies to that total and the conditional
/// bonus is added last.
pub fn roll_damage(
    spec: &DamageSpec,
    caster: &CasterProfile,
    critical: Option<&CriticalSpec>,
    conditional_bonus: u32,
    rng: &mut dyn RngSource,
) -> DamageRoll {
    let dice = spec.dice.map_or(0, |dice| dice.roll(rng));
    let mut amount = spec
        .base
        .saturating_add(dice)
        .saturating_add(caster.attack)
        .saturating_add(caster.attack_bonus)
        .saturating_sub(caster.weakness);

    let mut is_critical = false;
    if let Some(critical) = critical {
        if rng.roll_percent() < critical.chance_percent {
            amount = (amount as f64 * critical.multiplier as f64).floor() as u32;
            is_critical = true;
        }
    }

    DamageRoll {
        amount: amount.saturating_add(conditional_bonus),
        critical: is_critical,
    }
}

/// Evaluates a conditional predicate against the target as it stands before
/// the hit lands.
pub fn conditional_applies<P: CombatParticipant + ?Sized>(
    conditional: &ConditionalSpec,
    target: &P,
    config: &CombatConfig,
) -> bool {
    match conditional.predicate {
        Predicate::TargetHpBelowThreshold => {
            // hp / hp_max < threshold%, kept in integers
            (target.hp() as u64) * 100
                < (target.hp_max() as u64) * config.low_hp_threshold_percent as u64
        }
        Predicate::TargetMarked => target.is_marked(),
    }
}

pub fn roll_heal(spec: &HealSpec, rng: &mut dyn RngSource) -> u32 {
    spec.base
        .saturating_add(spec.dice.map_or(0, |dice| dice.roll(rng)))
}

//! Combat participant model.
//!
//! Heroes and enemies implement one capability contract,
//! [`CombatParticipant`]. Shared numeric state lives in [`Vitals`]; the trait's
//! provided methods implement the damage, heal, status and control rules on
//! top of it, and each variant overrides the hooks where it differs (shields
//! and buffs for heroes, affinities and boss phases for enemies).

mod buff;
mod common;
mod damage;
mod enemy;
mod hero;
mod snapshot;
mod status;

pub use buff::{Buff, BuffKind, Buffs};
pub use common::{CombatTotals, ParticipantId, Side};
pub use damage::{DamageReport, DamageType, DamageTypes, HealReport, HpLoss, apply_affinities};
pub use enemy::{AiPriority, Enemy, EnemyAttack};
pub use hero::Hero;
pub use snapshot::ParticipantSnapshot;
pub use status::{StatusEffect, StatusEffects, StatusKind, TickResult, TickSource};

use crate::config::CombatConfig;
use crate::rng::RngSource;

/// Hp, base stats and statuses shared by every participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vitals {
    pub hp: u32,
    pub hp_max: u32,
    pub attack: u32,
    pub defense: u32,
    /// Passive regeneration applied at the start of each status tick.
    pub regen: u32,
    pub statuses: StatusEffects,
    /// Hero: knocked out. Enemy: defeated.
    pub incapacitated: bool,
    pub totals: CombatTotals,
}

impl Vitals {
    /// Creates vitals with `hp` clamped into `[0, hp_max]`.
    ///
    /// A participant created at 0 hp starts incapacitated.
    pub fn new(hp_max: u32, hp: u32, attack: u32, defense: u32) -> Self {
        let hp_max = hp_max.max(1);
        let hp = hp.min(hp_max);
        Self {
            hp,
            hp_max,
            attack,
            defense,
            regen: 0,
            statuses: StatusEffects::empty(),
            incapacitated: hp == 0,
            totals: CombatTotals::default(),
        }
    }

    pub fn with_regen(mut self, regen: u32) -> Self {
        self.regen = regen;
        self
    }
}

/// Why a participant could not take its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "reason", rename_all = "snake_case"))]
pub enum SkipReason {
    Incapacitated,
    Controlled { status: StatusKind },
    /// Periodic damage at the start of the turn finished the participant off.
    DefeatedByStatus,
    /// Enemy had nobody left to attack.
    NoTarget,
}

/// Capability contract shared by heroes and enemies.
pub trait CombatParticipant {
    fn id(&self) -> ParticipantId;
    fn name(&self) -> &str;
    fn side(&self) -> Side;
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;
    fn snapshot(&self) -> ParticipantSnapshot;

    // ========================================================================
    // Variant hooks
    // ========================================================================

    fn vulnerabilities(&self) -> DamageTypes {
        DamageTypes::empty()
    }

    fn resistances(&self) -> DamageTypes {
        DamageTypes::empty()
    }

    /// Effective defense subtracted from every hit.
    fn defense(&self) -> u32 {
        self.vitals().defense
    }

    /// Flat bonus added to outgoing card damage.
    fn attack_bonus(&self) -> u32 {
        0
    }

    /// Hp healed at the start of each status tick.
    fn regeneration(&self) -> u32 {
        self.vitals().regen
    }

    /// Percent chance to evade an incoming enemy attack.
    fn evasion_chance(&self) -> u32 {
        0
    }

    /// Soaks damage before it reaches hp. Returns the absorbed amount.
    fn absorb(&mut self, _amount: u32) -> u32 {
        0
    }

    /// Called when hp reaches 0. Returns true if the participant survives by
    /// entering a new phase.
    fn try_advance_phase(&mut self, _config: &CombatConfig) -> bool {
        false
    }

    /// Called once when the participant is knocked out.
    fn on_defeated(&mut self) {
        let vitals = self.vitals_mut();
        vitals.incapacitated = true;
        vitals.statuses.clear();
    }

    /// Called at the end of a status tick, after status durations decrement.
    fn on_status_tick(&mut self) {}

    /// Adds to the shield buffer. Returns false if this variant has none.
    fn add_shield(&mut self, _amount: u32) -> bool {
        false
    }

    /// Applies a buff. Returns false if this variant cannot hold buffs.
    fn apply_buff(&mut self, _buff: Buff) -> bool {
        false
    }

    // ========================================================================
    // Provided rules
    // ========================================================================

    fn hp(&self) -> u32 {
        self.vitals().hp
    }

    fn hp_max(&self) -> u32 {
        self.vitals().hp_max
    }

    fn attack(&self) -> u32 {
        self.vitals().attack
    }

    fn is_incapacitated(&self) -> bool {
        self.vitals().incapacitated
    }

    fn statuses(&self) -> &StatusEffects {
        &self.vitals().statuses
    }

    fn has_status(&self, kind: StatusKind) -> bool {
        self.vitals().statuses.has(kind)
    }

    /// Derived from an active [`StatusKind::Marked`] effect.
    fn is_marked(&self) -> bool {
        self.has_status(StatusKind::Marked)
    }

    /// Reduction applied to this participant's outgoing damage.
    fn weakness(&self) -> u32 {
        self.vitals()
            .statuses
            .magnitude(StatusKind::Weakened)
            .unwrap_or(0)
    }

    fn totals(&self) -> CombatTotals {
        self.vitals().totals
    }

    fn record_damage_dealt(&mut self, amount: u32) {
        let totals = &mut self.vitals_mut().totals;
        totals.damage_dealt = totals.damage_dealt.saturating_add(amount);
    }

    /// Removes hp directly, bypassing affinities and defense.
    ///
    /// Handles boss phase transitions and defeat.
    fn lose_hp(&mut self, amount: u32, config: &CombatConfig) -> HpLoss {
        let vitals = self.vitals_mut();
        let lost = amount.min(vitals.hp);
        vitals.hp -= lost;
        vitals.totals.damage_taken = vitals.totals.damage_taken.saturating_add(lost);

        if lost == 0 || vitals.hp > 0 {
            return HpLoss {
                lost,
                ..HpLoss::default()
            };
        }

        if self.try_advance_phase(config) {
            return HpLoss {
                lost,
                phase_transition: true,
                ..HpLoss::default()
            };
        }

        self.on_defeated();
        HpLoss {
            lost,
            defeated: true,
            ..HpLoss::default()
        }
    }

    /// Applies a hit through the full damage pipeline.
    ///
    /// Order: vulnerability ×2, resistance ÷2 (floored), mark bonus, defense,
    /// minimum 1, shield, hp (floored at 0).
    fn receive_damage(
        &mut self,
        amount: u32,
        damage_type: DamageType,
        config: &CombatConfig,
    ) -> DamageReport {
        if self.is_incapacitated() {
            return DamageReport {
                defeated: true,
                ..DamageReport::default()
            };
        }

        let (mut adjusted, resisted, vulnerable) = apply_affinities(
            amount,
            damage_type,
            self.vulnerabilities(),
            self.resistances(),
        );

        if let Some(mark) = self.statuses().get(StatusKind::Marked) {
            adjusted = adjusted.saturating_add(mark.magnitude.unwrap_or(config.mark_bonus));
        }

        let final_amount = adjusted.saturating_sub(self.defense()).max(1);
        let absorbed = self.absorb(final_amount);
        let loss = self.lose_hp(final_amount - absorbed, config);

        DamageReport {
            final_amount,
            absorbed,
            defeated: loss.defeated,
            resisted,
            vulnerable,
            phase_transition: loss.phase_transition,
        }
    }

    /// Restores hp, clamped to `hp_max`. Incapacitated participants are not healed.
    fn receive_heal(&mut self, amount: u32) -> HealReport {
        let vitals = self.vitals_mut();
        if vitals.incapacitated {
            return HealReport {
                healed: false,
                amount: 0,
                new_hp: vitals.hp,
            };
        }

        let new_hp = vitals.hp.saturating_add(amount).min(vitals.hp_max);
        let restored = new_hp - vitals.hp;
        vitals.hp = new_hp;
        vitals.totals.healing_done = vitals.totals.healing_done.saturating_add(restored);

        HealReport {
            healed: true,
            amount: restored,
            new_hp,
        }
    }

    /// Applies a status, merging by kind. Incapacitated participants ignore statuses.
    fn apply_status(&mut self, effect: StatusEffect) -> bool {
        if self.is_incapacitated() {
            return false;
        }
        self.vitals_mut().statuses.apply(effect)
    }

    /// Clears every debuff status. Returns how many were removed.
    fn clear_debuffs(&mut self) -> usize {
        self.vitals_mut().statuses.clear()
    }

    /// Regeneration, then periodic damage, then duration countdown.
    ///
    /// Periodic damage may defeat the participant part way through; the
    /// remaining entries still run. Callers must re-check
    /// [`is_incapacitated`](Self::is_incapacitated) before acting.
    fn tick_status_effects(&mut self, config: &CombatConfig) -> Vec<TickResult> {
        let mut results = Vec::new();
        if self.is_incapacitated() {
            return results;
        }

        let regen = self.regeneration();
        if regen > 0 {
            let report = self.receive_heal(regen);
            if report.amount > 0 {
                results.push(TickResult {
                    source: TickSource::Regeneration,
                    amount: report.amount,
                });
            }
        }

        for (kind, damage) in self.statuses().periodic() {
            let loss = self.lose_hp(damage, config);
            results.push(TickResult {
                source: TickSource::Periodic { kind },
                amount: loss.lost,
            });
        }

        for kind in self.vitals_mut().statuses.decrement() {
            results.push(TickResult {
                source: TickSource::Expired { kind },
                amount: 0,
            });
        }

        self.on_status_tick();
        results
    }

    /// Explains why the participant cannot act right now.
    ///
    /// Fear is rolled on every call and never memoized.
    fn check_can_act(
        &self,
        rng: &mut dyn RngSource,
        config: &CombatConfig,
    ) -> Result<(), SkipReason> {
        if self.is_incapacitated() {
            return Err(SkipReason::Incapacitated);
        }
        if let Some(status) = self.statuses().hard_control() {
            return Err(SkipReason::Controlled { status });
        }
        if self.has_status(StatusKind::Feared) && rng.chance(config.fear_skip_percent) {
            return Err(SkipReason::Controlled {
                status: StatusKind::Feared,
            });
        }
        Ok(())
    }

    fn can_act(&self, rng: &mut dyn RngSource, config: &CombatConfig) -> bool {
        self.check_can_act(rng, config).is_ok()
    }

    /// Brings an incapacitated participant back with `hp_percent` of `hp_max`
    /// (at least 1). Returns the restored hp, or `None` if it was not down.
    fn revive(&mut self, hp_percent: u32) -> Option<u32> {
        let vitals = self.vitals_mut();
        if !vitals.incapacitated {
            return None;
        }
        let hp = (vitals.hp_max.saturating_mul(hp_percent) / 100).clamp(1, vitals.hp_max);
        vitals.hp = hp;
        vitals.incapacitated = false;
        Some(hp)
    }
}

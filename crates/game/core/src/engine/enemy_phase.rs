use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::participant::{
    CombatParticipant, Enemy, Hero, ParticipantId, SkipReason, StatusKind, TickResult,
};
use crate::rng::RngSource;
use crate::state::CombatPhase;

use super::CombatEngine;
use super::ai::{select_attack, select_target};

/// Everything one enemy did during the enemy phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTurnOutcome {
    pub attacker: ParticipantId,
    /// Status tick applied before the enemy acted.
    pub ticks: Vec<TickResult>,
    /// Set when the enemy did not attack.
    pub skipped: Option<SkipReason>,
    pub attack: Option<String>,
    pub target: Option<ParticipantId>,
    /// Damage after defense and shield, as reported by the target.
    pub damage: u32,
    pub evaded: bool,
    pub target_defeated: bool,
    pub status_applied: Option<StatusKind>,
    pub lifesteal: u32,
}

impl EnemyTurnOutcome {
    fn new(attacker: ParticipantId, ticks: Vec<TickResult>) -> Self {
        Self {
            attacker,
            ticks,
            skipped: None,
            attack: None,
            target: None,
            damage: 0,
            evaded: false,
            target_defeated: false,
            status_applied: None,
            lifesteal: 0,
        }
    }

    fn skipped(attacker: ParticipantId, ticks: Vec<TickResult>, reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::new(attacker, ticks)
        }
    }

    pub fn defeated_by_status(&self) -> bool {
        self.skipped == Some(SkipReason::DefeatedByStatus)
    }
}

/// Runs every enemy's turn in list order and returns the outcomes.
///
/// Per enemy: status tick, control check, target selection, attack choice,
/// damage roll with jitter, evasion roll, then the attack's rider status and
/// lifesteal when it connected.
pub fn process_enemy_turns(
    enemies: &mut [Enemy],
    heroes: &mut [Hero],
    rng: &mut dyn RngSource,
    config: &CombatConfig,
) -> Vec<EnemyTurnOutcome> {
    let mut outcomes = Vec::with_capacity(enemies.len());

    for enemy in enemies.iter_mut() {
        if enemy.is_defeated() {
            continue;
        }
        let attacker = enemy.id();

        let ticks = enemy.tick_status_effects(config);
        if enemy.is_defeated() {
            outcomes.push(EnemyTurnOutcome::skipped(
                attacker,
                ticks,
                SkipReason::DefeatedByStatus,
            ));
            continue;
        }

        if let Err(reason) = enemy.check_can_act(rng, config) {
            outcomes.push(EnemyTurnOutcome::skipped(attacker, ticks, reason));
            continue;
        }

        let Some(target_index) = select_target(enemy, heroes, rng) else {
            outcomes.push(EnemyTurnOutcome::skipped(
                attacker,
                ticks,
                SkipReason::NoTarget,
            ));
            continue;
        };
        let hero = &mut heroes[target_index];
        let attack = select_attack(enemy, rng);

        let jitter = config.enemy_damage_jitter as i64;
        let spread = config.enemy_damage_jitter.saturating_mul(2);
        let rolled = attack.damage as i64 + rng.range(0, spread) as i64
            - jitter
            - enemy.weakness() as i64;
        let damage = rolled.max(1) as u32;

        let mut outcome = EnemyTurnOutcome {
            attack: Some(attack.name.clone()),
            target: Some(hero.id()),
            ..EnemyTurnOutcome::new(attacker, ticks)
        };

        let evasion = hero.evasion_chance();
        if evasion > 0 && rng.chance(evasion) {
            outcome.evaded = true;
            outcomes.push(outcome);
            continue;
        }

        let report = hero.receive_damage(damage, attack.damage_type, config);
        enemy.record_damage_dealt(report.final_amount);
        outcome.damage = report.final_amount;
        outcome.target_defeated = report.defeated;

        if let Some(rider) = attack.inflicts {
            if hero.apply_status(rider.to_effect(attacker)) {
                outcome.status_applied = Some(rider.kind);
            }
        }
        if attack.lifesteal > 0 {
            outcome.lifesteal = enemy.receive_heal(attack.lifesteal).amount;
        }

        outcomes.push(outcome);
    }

    outcomes
}

impl<'a> CombatEngine<'a> {
    /// Runs the enemy phase to completion.
    ///
    /// Emits one `EnemyTurnResult` per acting enemy, then checks victory
    /// (enemies can die to their own statuses) and defeat before starting
    /// the next round.
    pub fn run_enemy_phase(&mut self) -> Result<Vec<EnemyTurnOutcome>, CombatError> {
        if self.turn.phase != CombatPhase::EnemyPhase {
            return Err(CombatError::NotEnemyPhase);
        }

        let outcomes = process_enemy_turns(
            &mut self.roster.enemies,
            &mut self.roster.heroes,
            self.rng,
            self.config,
        );
        for outcome in &outcomes {
            self.events.emit(CombatEvent::EnemyTurnResult(outcome.clone()));
        }

        if self.conclude_if_decided().is_none() {
            self.finalize_enemy_phase()?;
        }
        Ok(outcomes)
    }
}

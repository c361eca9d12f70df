//! Hero-phase scheduling.
//!
//! Heroes act in party order. Moving to the next hero walks forward over
//! `ordered_hero_ids` in a bounded loop, skipping anyone who cannot act; once
//! the walk runs past the last hero the enemy phase begins.

use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::participant::{CombatParticipant, SkipReason};
use crate::state::{CombatPhase, Outcome};

use super::CombatEngine;

impl<'a> CombatEngine<'a> {
    /// Starts round 1 with the roster's heroes in party order.
    ///
    /// Every hero's action points are restored. Statuses are not ticked for
    /// the opening turn.
    pub fn start_combat(&mut self) -> CombatPhase {
        self.turn.round = 1;
        self.turn.turn_index = 0;
        self.turn.active = None;
        self.turn.ordered_hero_ids = self.roster.heroes.iter().map(|hero| hero.id()).collect();

        for hero in &mut self.roster.heroes {
            hero.restore_action_points();
        }

        self.activate_from(0, false)
    }

    /// Ends the active hero's turn and hands control to the next hero able
    /// to act, or to the enemy phase.
    pub fn finalize_turn(&mut self) -> Result<CombatPhase, CombatError> {
        if self.turn.phase != CombatPhase::HeroPhase {
            return Err(CombatError::NoActiveParticipant);
        }
        self.turn.active = None;
        Ok(self.activate_from(self.turn.turn_index + 1, true))
    }

    /// Closes the enemy phase: defeat if no hero is standing, otherwise a new
    /// round starting from the first hero able to act.
    pub fn finalize_enemy_phase(&mut self) -> Result<CombatPhase, CombatError> {
        if self.turn.phase != CombatPhase::EnemyPhase {
            return Err(CombatError::NotEnemyPhase);
        }

        if self.roster.all_heroes_incapacitated() {
            self.conclude(Outcome::Defeat);
            return Ok(self.turn.phase);
        }

        self.turn.round += 1;
        self.turn.turn_index = 0;
        self.turn.phase = CombatPhase::HeroPhase;
        self.events.emit(CombatEvent::RoundStarted {
            round: self.turn.round,
        });

        Ok(self.activate_from(0, true))
    }

    /// Activates the first hero at or after `start` that can act.
    ///
    /// Each hero is visited at most once, so the walk always terminates.
    /// Controlled heroes still have their statuses ticked so control effects
    /// run out.
    fn activate_from(&mut self, start: usize, tick: bool) -> CombatPhase {
        for index in start..self.turn.ordered_hero_ids.len() {
            let id = self.turn.ordered_hero_ids[index];
            let Some(hero) = self.roster.hero_mut(id) else {
                continue;
            };

            if let Err(reason) = hero.check_can_act(self.rng, self.config) {
                if tick && !hero.is_incapacitated() {
                    let results = hero.tick_status_effects(self.config);
                    if !results.is_empty() {
                        self.events.emit(CombatEvent::StatusTicked { id, results });
                    }
                }
                self.events.emit(CombatEvent::TurnSkipped { id, reason });
                continue;
            }

            if tick {
                let results = hero.tick_status_effects(self.config);
                if !results.is_empty() {
                    self.events.emit(CombatEvent::StatusTicked { id, results });
                }
                if hero.is_incapacitated() {
                    self.events.emit(CombatEvent::TurnSkipped {
                        id,
                        reason: SkipReason::DefeatedByStatus,
                    });
                    continue;
                }
            }

            hero.restore_action_points();
            self.turn.turn_index = index;
            self.turn.active = Some(id);
            self.turn.phase = CombatPhase::HeroPhase;
            self.events.emit(CombatEvent::TurnStarted {
                phase: CombatPhase::HeroPhase,
                active_id: Some(id),
                round: self.turn.round,
            });
            return CombatPhase::HeroPhase;
        }

        self.turn.active = None;
        self.turn.phase = CombatPhase::EnemyPhase;
        self.events.emit(CombatEvent::EnemyPhaseStarted {
            round: self.turn.round,
        });
        CombatPhase::EnemyPhase
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::roster;
    use super::*;
    use crate::config::CombatConfig;
    use crate::participant::{DamageType, ParticipantId, StatusEffect, StatusKind};
    use crate::rng::ScriptedRng;
    use crate::state::TurnState;

    #[test]
    fn turn_order_follows_party_order() {
        let mut turn = TurnState::new();
        let mut roster = roster(3, 1);
        let mut rng = ScriptedRng::constant(99);
        let config = CombatConfig::default();
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);

        assert_eq!(engine.start_combat(), CombatPhase::HeroPhase);
        let mut order = vec![engine.turn().active];
        while engine.finalize_turn().unwrap() == CombatPhase::HeroPhase {
            order.push(engine.turn().active);
        }

        assert_eq!(
            order,
            vec![
                Some(ParticipantId(1)),
                Some(ParticipantId(2)),
                Some(ParticipantId(3))
            ]
        );
        assert_eq!(engine.turn().phase, CombatPhase::EnemyPhase);
        assert_eq!(engine.turn().active, None);
        assert!(engine.turn().turn_index < 3);
    }

    #[test]
    fn all_incapacitated_heroes_fall_through_to_enemy_phase() {
        let mut turn = TurnState::new();
        let mut roster = roster(4, 1);
        let config = CombatConfig::default();
        for hero in &mut roster.heroes {
            hero.receive_damage(100, DamageType::Physical, &config);
        }
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);

        assert_eq!(engine.start_combat(), CombatPhase::EnemyPhase);
        assert_eq!(engine.turn().active, None);

        let skipped = events
            .iter()
            .filter(|event| matches!(event, CombatEvent::TurnSkipped { .. }))
            .count();
        assert_eq!(skipped, 4);
        assert!(matches!(
            events.last(),
            Some(CombatEvent::EnemyPhaseStarted { round: 1 })
        ));
    }

    #[test]
    fn frozen_hero_is_skipped_and_thaws() {
        let mut turn = TurnState::new();
        let mut roster = roster(2, 1);
        let config = CombatConfig::default();
        roster.heroes[1].apply_status(StatusEffect::new(StatusKind::Frozen, 1));
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);

        engine.start_combat();
        assert_eq!(engine.finalize_turn().unwrap(), CombatPhase::EnemyPhase);
        assert!(!engine.roster().heroes[1].has_status(StatusKind::Frozen));

        assert_eq!(engine.finalize_enemy_phase().unwrap(), CombatPhase::HeroPhase);
        assert_eq!(engine.turn().round, 2);
        assert_eq!(engine.finalize_turn().unwrap(), CombatPhase::HeroPhase);
        assert_eq!(engine.turn().active, Some(ParticipantId(2)));

        assert!(events.iter().any(|event| matches!(
            event,
            CombatEvent::TurnSkipped {
                id: ParticipantId(2),
                reason: SkipReason::Controlled {
                    status: StatusKind::Frozen
                }
            }
        )));
    }

    #[test]
    fn hero_killed_by_periodic_damage_loses_its_turn() {
        let mut turn = TurnState::new();
        let mut roster = roster(2, 1);
        let config = CombatConfig::default();
        roster.heroes[1].vitals_mut().hp = 2;
        roster.heroes[1]
            .apply_status(StatusEffect::new(StatusKind::Bleeding, 3).with_periodic_damage(5));
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);

        engine.start_combat();
        assert_eq!(engine.finalize_turn().unwrap(), CombatPhase::EnemyPhase);
        assert!(events.iter().any(|event| matches!(
            event,
            CombatEvent::TurnSkipped {
                reason: SkipReason::DefeatedByStatus,
                ..
            }
        )));
    }

    #[test]
    fn enemy_phase_ends_in_defeat_without_standing_heroes() {
        let mut turn = TurnState::new();
        let mut roster = roster(1, 1);
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);

        engine.start_combat();
        engine.finalize_turn().unwrap();
        engine.roster.heroes[0].receive_damage(100, DamageType::Physical, &config);

        let phase = engine.finalize_enemy_phase().unwrap();
        assert_eq!(phase, CombatPhase::CombatOver(Outcome::Defeat));
        assert!(matches!(
            events.last(),
            Some(CombatEvent::CombatEnded {
                outcome: Outcome::Defeat,
                rewards_summary: None,
                ..
            })
        ));
    }

    #[test]
    fn finalize_guards_the_phase() {
        let mut turn = TurnState::new();
        let mut roster = roster(1, 1);
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);

        assert_eq!(engine.finalize_turn(), Err(CombatError::NoActiveParticipant));
        engine.start_combat();
        assert_eq!(engine.finalize_enemy_phase(), Err(CombatError::NotEnemyPhase));
    }
}

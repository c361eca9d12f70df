use crate::card::{Card, TargetMode};
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::participant::ParticipantId;
use crate::resolver::{self, EffectResult};
use crate::state::{CombatPhase, Outcome};

use super::CombatEngine;

/// What a resolved card did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardPlay {
    pub card: String,
    pub user: ParticipantId,
    pub targets: Vec<ParticipantId>,
    pub results: Vec<EffectResult>,
    /// Set when the card ended the combat.
    pub outcome: Option<Outcome>,
}

impl<'a> CombatEngine<'a> {
    /// The hero whose turn it is.
    pub fn active_hero_id(&self) -> Result<ParticipantId, CombatError> {
        match (self.turn.phase, self.turn.active) {
            (CombatPhase::HeroPhase, Some(id)) => Ok(id),
            _ => Err(CombatError::NoActiveParticipant),
        }
    }

    /// Looks up `card_id` in the active hero's hand and checks it is
    /// affordable. Nothing is mutated.
    pub fn playable_card(&self, card_id: &str) -> Result<Card, CombatError> {
        let hero_id = self.active_hero_id()?;
        let hero = self
            .roster
            .hero(hero_id)
            .ok_or(CombatError::UnknownParticipant(hero_id))?;
        let card = hero.card(card_id).ok_or_else(|| CombatError::CardNotInHand {
            hero: hero_id,
            card: card_id.to_string(),
        })?;

        if !hero.can_afford(card.pa_cost) {
            return Err(CombatError::InsufficientActionPoints {
                required: card.pa_cost,
                available: hero.action_points(),
            });
        }
        Ok(card.clone())
    }

    /// Legal targets of `card` for the active hero.
    pub fn possible_targets(&self, card: &Card) -> Result<Vec<ParticipantId>, CombatError> {
        let hero_id = self.active_hero_id()?;
        Ok(resolver::possible_targets(self.roster, hero_id, card))
    }

    /// Plays `card_id` from the active hero's hand.
    ///
    /// Self and area cards ignore `target`; single-target cards require a
    /// legal one. All checks run before anything is spent. Action points are
    /// paid first, then effects apply, then victory is checked.
    pub fn play_card(
        &mut self,
        card_id: &str,
        target: Option<ParticipantId>,
    ) -> Result<CardPlay, CombatError> {
        let card = self.playable_card(card_id)?;
        let user = self.active_hero_id()?;
        let targets = self.resolve_targets(&card, user, target)?;

        if let Some(hero) = self.roster.hero_mut(user) {
            hero.spend_action_points(card.pa_cost);
        }

        let results = resolver::resolve_card(
            self.roster,
            user,
            &card,
            &targets,
            self.rng,
            self.config,
        );

        match (card.target_mode.is_area(), targets.first()) {
            (false, Some(&target)) => self.events.emit(CombatEvent::CardUsed {
                card: card.id.clone(),
                user,
                target,
                results: results.clone(),
            }),
            _ => self.events.emit(CombatEvent::AreaCardUsed {
                card: card.id.clone(),
                user,
                results: results.clone(),
            }),
        }

        let outcome = self.conclude_if_decided();
        Ok(CardPlay {
            card: card.id,
            user,
            targets,
            results,
            outcome,
        })
    }

    fn resolve_targets(
        &self,
        card: &Card,
        user: ParticipantId,
        target: Option<ParticipantId>,
    ) -> Result<Vec<ParticipantId>, CombatError> {
        match card.target_mode {
            TargetMode::SelfOnly => Ok(vec![user]),
            mode if mode.is_area() => Ok(resolver::legal_targets(self.roster, user, mode)),
            mode => {
                let target = target.ok_or_else(|| CombatError::TargetRequired {
                    card: card.id.clone(),
                })?;
                if !resolver::is_legal_target(self.roster, user, mode, target) {
                    return Err(CombatError::IllegalTarget {
                        card: card.id.clone(),
                        target,
                    });
                }
                Ok(vec![target])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{enemy, hero_with_hand, roster};
    use super::*;
    use crate::card::{CardEffect, DamageSpec};
    use crate::config::CombatConfig;
    use crate::env::Rewards;
    use crate::participant::{CombatParticipant, DamageType};
    use crate::rng::ScriptedRng;
    use crate::state::{Roster, TurnState};

    #[test]
    fn strike_spends_points_and_deals_damage() {
        let mut turn = TurnState::new();
        let mut roster = roster(1, 2);
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);
        engine.start_combat();

        let play = engine
            .play_card("strike", Some(ParticipantId::enemy(1)))
            .unwrap();
        assert_eq!(play.results.len(), 1);
        assert_eq!(play.results[0].value, 2);
        assert_eq!(play.outcome, None);
        assert_eq!(engine.roster().heroes[0].action_points(), 2);
        assert_eq!(engine.roster().enemies[1].hp(), 8);
    }

    #[test]
    fn rejected_plays_leave_state_untouched() {
        let mut turn = TurnState::new();
        let mut roster = roster(1, 1);
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);
        engine.start_combat();

        assert!(matches!(
            engine.play_card("fireball", Some(ParticipantId::enemy(0))),
            Err(CombatError::CardNotInHand { .. })
        ));
        assert!(matches!(
            engine.play_card("strike", Some(ParticipantId::hero(0))),
            Err(CombatError::IllegalTarget { .. })
        ));
        assert!(matches!(
            engine.play_card("strike", None),
            Err(CombatError::TargetRequired { .. })
        ));
        assert_eq!(engine.roster().heroes[0].action_points(), 3);

        engine.play_card("strike", Some(ParticipantId::enemy(0))).unwrap();
        engine.play_card("strike", Some(ParticipantId::enemy(0))).unwrap();
        engine.play_card("strike", Some(ParticipantId::enemy(0))).unwrap();
        assert_eq!(
            engine.play_card("strike", Some(ParticipantId::enemy(0))),
            Err(CombatError::InsufficientActionPoints {
                required: 1,
                available: 0
            })
        );
    }

    #[test]
    fn area_card_emits_one_event_and_wins() {
        let volley = Card::new(
            "volley",
            "warrior",
            2,
            TargetMode::AllEnemies,
            &[CardEffect::Damage(DamageSpec {
                base: 10,
                dice: None,
                damage_type: DamageType::Physical,
            })],
        )
        .unwrap();
        let mut roster = Roster::new(
            vec![hero_with_hand(0, vec![volley])],
            (0..3).map(|i| enemy(i, 5, 1)).collect(),
        );

        let mut turn = TurnState::new();
        let config = CombatConfig::default();
        let mut rng = ScriptedRng::constant(0);
        let mut events = Vec::new();
        let mut engine = CombatEngine::new(&mut turn, &mut roster, &mut rng, &config, &mut events);
        engine.start_combat();

        let play = engine.play_card("volley", None).unwrap();
        assert_eq!(play.results.len(), 3);
        assert!(play.results.iter().all(|result| result.defeated));
        assert_eq!(play.outcome, Some(Outcome::Victory));
        assert_eq!(
            engine.turn().phase,
            CombatPhase::CombatOver(Outcome::Victory)
        );

        let area_events = events
            .iter()
            .filter(|event| matches!(event, CombatEvent::AreaCardUsed { .. }))
            .count();
        assert_eq!(area_events, 1);
        assert!(matches!(
            events.last(),
            Some(CombatEvent::CombatEnded {
                outcome: Outcome::Victory,
                rewards_summary: Some(Rewards { xp: 0, gold: 0 }),
                ..
            })
        ));
    }
}

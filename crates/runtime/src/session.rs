//! Combat orchestrator.
//!
//! [`CombatSession`] owns the party, the live roster and the turn state, and
//! exposes the action API presentation layers drive: start a combat, pick a
//! card, pick its target, cancel, end the turn and run the enemy phase. Every
//! operation runs to completion against a [`CombatEngine`] before the events
//! it produced are published on the session's [`EventBus`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use combat_core::{
    Card, CardPlay, CombatEngine, CombatError, CombatEvent, CombatParticipant, CombatPhase,
    CompositionEntry, Enemy, EnemyTurnOutcome, GameError, Hero, Outcome, ParticipantId,
    ParticipantSnapshot, PcgRng, Rewards, Roster, TargetMode, TemplateOracle, TurnState,
    compute_seed,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, EventObserver, SubscriptionId, Topic};

/// Upper bound on enemy phases run back to back by one `end_turn`.
///
/// Phases chain when no hero can act at the start of a round; every chained
/// round ticks the skipped heroes' statuses, so control effects run out long
/// before this.
pub const MAX_CHAINED_ENEMY_PHASES: usize = 64;

/// A card waiting for its target.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSelection {
    pub card: Card,
    pub user: ParticipantId,
    pub legal_targets: Vec<ParticipantId>,
}

/// Result of [`CombatSession::select_card`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardSelection {
    /// Self and area cards resolve on selection.
    Resolved(CardPlay),
    /// The card is pending until [`CombatSession::select_target`].
    AwaitingTarget {
        card: String,
        target_mode: TargetMode,
        legal_targets: Vec<ParticipantId>,
    },
}

/// What a successful [`CombatSession::start_combat`] set up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombatStart {
    pub heroes: Vec<ParticipantSnapshot>,
    pub enemies: Vec<ParticipantSnapshot>,
    /// Template ids from the composition that could not be resolved.
    pub skipped_templates: Vec<String>,
    pub phase: CombatPhase,
}

/// Serializable view of the whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombatSnapshot {
    pub round: u32,
    pub phase: CombatPhase,
    pub active_id: Option<ParticipantId>,
    pub heroes: Vec<ParticipantSnapshot>,
    pub enemies: Vec<ParticipantSnapshot>,
    pub pending_card: Option<String>,
    pub legal_targets: Vec<ParticipantId>,
}

pub struct CombatSession {
    oracle: Arc<dyn TemplateOracle>,
    config: RuntimeConfig,
    base_seed: u64,
    combats_started: u64,
    rng: PcgRng,
    roster: Roster,
    turn: TurnState,
    pending: Option<PendingSelection>,
    bus: EventBus,
}

impl CombatSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Builds enemies from `composition` and starts round 1.
    ///
    /// A combat already in progress is rejected unless `force_reset` is set,
    /// in which case it is discarded first. Unknown template ids are skipped;
    /// the start fails without touching the party if none resolve. Heroes
    /// keep their hp but lose PA, buffs, statuses and shield.
    pub fn start_combat(
        &mut self,
        composition: &[CompositionEntry],
        force_reset: bool,
    ) -> Result<CombatStart> {
        if self.turn.phase.is_active() {
            if !force_reset {
                return Err(rejected("start_combat", CombatError::CombatAlreadyActive));
            }
            info!(round = self.turn.round, "force reset: discarding active combat");
            self.retire();
        }

        let mut enemies: Vec<Enemy> = Vec::with_capacity(composition.len());
        let mut skipped_templates = Vec::new();
        for entry in composition {
            match self.oracle.enemy_template(&entry.template_id) {
                Some(template) => enemies.push(Enemy::from_template(
                    ParticipantId::enemy(enemies.len()),
                    template,
                    entry.placement.clone(),
                )),
                None => {
                    warn!(template = %entry.template_id, "unknown enemy template, skipping");
                    skipped_templates.push(entry.template_id.clone());
                }
            }
        }

        if enemies.is_empty() {
            return Err(rejected("start_combat", CombatError::NoEnemiesResolved));
        }
        if self.roster.all_heroes_incapacitated() {
            return Err(rejected("start_combat", CombatError::NoHeroesAvailable));
        }

        for hero in &mut self.roster.heroes {
            hero.reset_for_combat();
        }
        self.roster.enemies = enemies;
        self.turn.reset();
        self.pending = None;
        self.combats_started += 1;
        self.rng = PcgRng::new(compute_seed(self.base_seed, self.combats_started, 0, 0));

        let heroes = self.roster.hero_snapshots();
        let enemies = self.roster.enemy_snapshots();
        self.publish(&CombatEvent::CombatStarted {
            heroes: heroes.clone(),
            enemies: enemies.clone(),
        });
        let phase = self.with_engine(|engine| engine.start_combat());

        Ok(CombatStart {
            heroes,
            enemies,
            skipped_templates,
            phase,
        })
    }

    /// Picks a card from the active hero's hand.
    ///
    /// Self and area cards resolve immediately. Single-target cards become
    /// the pending selection, replacing any earlier one, and publish
    /// `ModeTargetSelection` with the legal targets.
    pub fn select_card(&mut self, card_id: &str) -> Result<CardSelection> {
        let checked = self.with_engine(|engine| {
            let card = engine.playable_card(card_id)?;
            let legal_targets = engine.possible_targets(&card)?;
            Ok::<_, CombatError>((card, engine.active_hero_id()?, legal_targets))
        });
        let (card, user, legal_targets) = checked.map_err(|err| rejected("select_card", err))?;

        if card.target_mode.resolves_immediately() {
            self.pending = None;
            let play = self
                .with_engine(|engine| engine.play_card(card_id, None))
                .map_err(|err| rejected("select_card", err))?;
            debug!(card = %play.card, user = %play.user, effects = play.results.len(), "card resolved");
            return Ok(CardSelection::Resolved(play));
        }

        debug!(card = %card.id, user = %user, targets = legal_targets.len(), "awaiting target");
        let selection = CardSelection::AwaitingTarget {
            card: card.id.clone(),
            target_mode: card.target_mode,
            legal_targets: legal_targets.clone(),
        };
        self.publish(&CombatEvent::ModeTargetSelection {
            card: card.id.clone(),
            target_mode: card.target_mode,
            legal_targets: legal_targets.clone(),
        });
        self.pending = Some(PendingSelection {
            card,
            user,
            legal_targets,
        });
        Ok(selection)
    }

    /// Drops the pending card. Nothing is spent and nothing is applied.
    pub fn cancel_selection(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Err(rejected("cancel_selection", CombatError::NoPendingSelection));
        };
        self.publish(&CombatEvent::SelectionCancelled {
            card: pending.card.id,
        });
        Ok(())
    }

    /// Resolves the pending card against `target`.
    ///
    /// An illegal target leaves the selection pending so another can be
    /// chosen.
    pub fn select_target(&mut self, target: ParticipantId) -> Result<CardPlay> {
        let Some(card_id) = self.pending.as_ref().map(|pending| pending.card.id.clone()) else {
            return Err(rejected("select_target", CombatError::NoPendingSelection));
        };

        let play = self
            .with_engine(|engine| engine.play_card(&card_id, Some(target)))
            .map_err(|err| rejected("select_target", err))?;
        self.pending = None;
        debug!(card = %play.card, user = %play.user, target = %target, "card resolved");
        Ok(play)
    }

    /// Ends the active hero's turn.
    ///
    /// A pending selection is cancelled first. When the last hero finishes
    /// and `auto_enemy_phase` is on, the enemy phase runs before returning.
    pub fn end_turn(&mut self) -> Result<CombatPhase> {
        let active = self
            .with_engine(|engine| engine.active_hero_id())
            .map_err(|err| rejected("end_turn", err))?;
        if self.pending.is_some() {
            self.cancel_selection()?;
        }

        let phase = self
            .with_engine(|engine| engine.finalize_turn())
            .map_err(|err| rejected("end_turn", err))?;
        debug!(hero = %active, ?phase, "turn ended");

        if phase == CombatPhase::EnemyPhase && self.config.auto_enemy_phase {
            self.run_enemy_phases()?;
        }
        Ok(self.turn.phase)
    }

    /// Runs one enemy phase: every enemy acts, then victory, defeat and the
    /// next round are settled.
    pub fn process_enemy_phase(&mut self) -> Result<Vec<EnemyTurnOutcome>> {
        let outcomes = self
            .with_engine(|engine| engine.run_enemy_phase())
            .map_err(|err| rejected("process_enemy_phase", err))?;

        for outcome in &outcomes {
            match (outcome.skipped, outcome.target) {
                (Some(reason), _) => {
                    debug!(enemy = %outcome.attacker, ?reason, "enemy skipped");
                }
                (None, Some(target)) => debug!(
                    enemy = %outcome.attacker,
                    target = %target,
                    damage = outcome.damage,
                    evaded = outcome.evaded,
                    "enemy attacked"
                ),
                (None, None) => {}
            }
        }
        Ok(outcomes)
    }

    /// Discards the current combat. The party and its hp are kept.
    pub fn reset(&mut self) {
        info!(round = self.turn.round, "combat reset");
        self.retire();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Legal targets for `card_id` in the active hero's hand.
    pub fn possible_targets(&mut self, card_id: &str) -> Result<Vec<ParticipantId>> {
        self.with_engine(|engine| -> std::result::Result<_, CombatError> {
            let user = engine.active_hero_id()?;
            let card = engine
                .roster()
                .hero(user)
                .and_then(|hero| hero.card(card_id))
                .cloned()
                .ok_or_else(|| CombatError::CardNotInHand {
                    hero: user,
                    card: card_id.to_string(),
                })?;
            engine.possible_targets(&card)
        })
        .map_err(RuntimeError::from)
    }

    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            round: self.turn.round,
            phase: self.turn.phase,
            active_id: self.turn.active,
            heroes: self.roster.hero_snapshots(),
            enemies: self.roster.enemy_snapshots(),
            pending_card: self.pending.as_ref().map(|pending| pending.card.id.clone()),
            legal_targets: self
                .pending
                .as_ref()
                .map(|pending| pending.legal_targets.clone())
                .unwrap_or_default(),
        }
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn pending_selection(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.turn.outcome()
    }

    pub fn is_active(&self) -> bool {
        self.turn.phase.is_active()
    }

    /// Experience and gold from every enemy defeated so far.
    pub fn rewards(&self) -> Rewards {
        self.roster.rewards()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Seed every combat's random stream is derived from.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn combats_started(&self) -> u64 {
        self.combats_started
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn event_bus(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn subscribe(
        &mut self,
        topics: &[Topic],
        observer: impl EventObserver + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(topics, observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn with_engine<T>(&mut self, op: impl FnOnce(&mut CombatEngine<'_>) -> T) -> T {
        let mut events = Vec::new();
        let result = {
            let mut engine = CombatEngine::new(
                &mut self.turn,
                &mut self.roster,
                &mut self.rng,
                &self.config.combat,
                &mut events,
            );
            op(&mut engine)
        };
        for event in &events {
            self.publish(event);
        }
        result
    }

    fn publish(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::CombatStarted { heroes, enemies } => info!(
                combat = self.combats_started,
                heroes = heroes.len(),
                enemies = enemies.len(),
                "combat started"
            ),
            CombatEvent::CombatEnded {
                outcome,
                rounds,
                rewards_summary,
            } => info!(
                %outcome,
                rounds,
                xp = rewards_summary.map_or(0, |r| r.xp),
                gold = rewards_summary.map_or(0, |r| r.gold),
                "combat ended"
            ),
            other => debug!(event = other.name(), "event"),
        }
        self.bus.publish(event);
    }

    fn run_enemy_phases(&mut self) -> Result<()> {
        let mut chained = 0;
        while self.turn.phase == CombatPhase::EnemyPhase {
            if chained == MAX_CHAINED_ENEMY_PHASES {
                warn!(chained, "no hero could act for too many rounds; pausing in enemy phase");
                break;
            }
            self.process_enemy_phase()?;
            chained += 1;
        }
        Ok(())
    }

    fn retire(&mut self) {
        self.turn.reset();
        self.roster.enemies.clear();
        self.pending = None;
    }
}

fn rejected(action: &'static str, err: CombatError) -> RuntimeError {
    warn!(action, code = err.error_code(), "rejected: {err}");
    RuntimeError::Combat(err)
}

/// Builder for [`CombatSession`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    oracle: Option<Arc<dyn TemplateOracle>>,
    party: Vec<String>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracle: None,
            party: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required template oracle
    pub fn oracle(mut self, oracle: impl TemplateOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    /// Set an oracle that other sessions already hold
    pub fn shared_oracle(mut self, oracle: Arc<dyn TemplateOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Hero template ids in turn order. The order is kept as given.
    pub fn party<I, S>(mut self, hero_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.party = hero_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<CombatSession> {
        let oracle = self.oracle.ok_or(RuntimeError::MissingOracle)?;
        if self.party.is_empty() {
            return Err(RuntimeError::EmptyParty);
        }

        let heroes = self
            .party
            .iter()
            .enumerate()
            .map(|(index, hero_id)| {
                let template = oracle
                    .hero_template(hero_id)
                    .ok_or_else(|| RuntimeError::UnknownHero(hero_id.clone()))?;
                Ok(Hero::from_template(
                    ParticipantId::hero(index),
                    template,
                    oracle.hand_for(template),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        for hero in &heroes {
            if hero.hand().is_empty() {
                warn!(hero = hero.name(), "hero has no cards");
            }
        }

        let base_seed = self.config.resolve_seed();
        info!(seed = base_seed, party = heroes.len(), "combat session ready");

        Ok(CombatSession {
            oracle,
            base_seed,
            combats_started: 0,
            rng: PcgRng::new(base_seed),
            roster: Roster::new(heroes, Vec::new()),
            turn: TurnState::new(),
            pending: None,
            bus: EventBus::new(),
            config: self.config,
        })
    }
}

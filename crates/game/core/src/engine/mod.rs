//! Turn scheduling and action execution.
//!
//! [`CombatEngine`] is the authoritative reducer for one combat. It borrows
//! the turn bookkeeping, the roster, the random source and an event sink for
//! the duration of a single operation, mutates state, and pushes the
//! resulting [`CombatEvent`]s in the order they happened. Outcomes are fully
//! computed before any caller gets to present them.
//!
//! The engine never logs; the runtime decides what to trace.

mod actions;
mod ai;
mod enemy_phase;
mod turns;

pub use actions::CardPlay;
pub use ai::{select_attack, select_target};
pub use enemy_phase::{EnemyTurnOutcome, process_enemy_turns};

use crate::config::CombatConfig;
use crate::event::{CombatEvent, EventSink};
use crate::rng::RngSource;
use crate::state::{CombatPhase, Outcome, Roster, TurnState};

pub struct CombatEngine<'a> {
    turn: &'a mut TurnState,
    roster: &'a mut Roster,
    rng: &'a mut dyn RngSource,
    config: &'a CombatConfig,
    events: &'a mut dyn EventSink,
}

impl<'a> CombatEngine<'a> {
    pub fn new(
        turn: &'a mut TurnState,
        roster: &'a mut Roster,
        rng: &'a mut dyn RngSource,
        config: &'a CombatConfig,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            turn,
            roster,
            rng,
            config,
            events,
        }
    }

    pub fn turn(&self) -> &TurnState {
        self.turn
    }

    pub fn roster(&self) -> &Roster {
        self.roster
    }

    /// Victory takes precedence: a card that finishes the last enemy wins
    /// even if it also downed the caster.
    pub fn check_outcome(&self) -> Option<Outcome> {
        if self.roster.all_enemies_defeated() {
            Some(Outcome::Victory)
        } else if self.roster.all_heroes_incapacitated() {
            Some(Outcome::Defeat)
        } else {
            None
        }
    }

    /// Ends the combat and emits `CombatEnded`.
    ///
    /// Victories carry the rewards of every defeated enemy.
    pub fn conclude(&mut self, outcome: Outcome) {
        self.turn.phase = CombatPhase::CombatOver(outcome);
        self.turn.active = None;

        let rewards_summary = match outcome {
            Outcome::Victory => Some(self.roster.rewards()),
            Outcome::Defeat => None,
        };
        self.events.emit(CombatEvent::CombatEnded {
            outcome,
            rounds: self.turn.round,
            rewards_summary,
        });
    }

    /// Concludes the combat if either side is wiped out.
    fn conclude_if_decided(&mut self) -> Option<Outcome> {
        let outcome = self.check_outcome()?;
        self.conclude(outcome);
        Some(outcome)
    }
}

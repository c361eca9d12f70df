//! Authoritative combat state.
//!
//! [`Roster`] owns every participant of the encounter and [`TurnState`]
//! tracks round, phase and the active hero. Runtime layers read this state
//! through snapshots and mutate it exclusively through the engine.
mod roster;
mod turn;

pub use roster::Roster;
pub use turn::{CombatPhase, Outcome, TurnState};

//! Runtime orchestration for card-driven party combat.
//!
//! This crate wraps the pure rules in `combat-core` with a stateful session,
//! an event bus and structured logging. Consumers build a [`CombatSession`]
//! from a template oracle and a party, drive it through its action API, and
//! subscribe to the [`CombatEvent`](combat_core::CombatEvent) stream.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and its builder
//! - [`events`] provides the topic-based event bus and stock observers
//! - [`config`] and [`error`] define the runtime's configuration and errors
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, EventLog, EventObserver, JsonLineObserver, SubscriptionId, Topic};
pub use session::{
    CardSelection, CombatSession, CombatSnapshot, CombatStart, MAX_CHAINED_ENEMY_PHASES,
    PendingSelection, SessionBuilder,
};

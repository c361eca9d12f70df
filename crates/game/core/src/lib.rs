//! Pure combat rules for a turn-based, card-driven party RPG.
//!
//! `combat-core` defines participants, cards, the effect resolver and the
//! turn-order state machine. It performs no I/O and never logs: content is
//! supplied through [`env::TemplateOracle`], randomness through
//! [`rng::RngSource`], and every observable change is reported as a
//! [`event::CombatEvent`]. All state mutation flows through
//! [`engine::CombatEngine`].
pub mod card;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod participant;
pub mod resolver;
pub mod rng;
pub mod state;

pub use card::{
    BuffSpec, Card, CardDefinition, CardEffect, CardError, ConditionalSpec, CriticalSpec,
    DamageSpec, DebuffSpec, EffectKind, EffectSpec, HealSpec, Predicate, TargetMode,
};
pub use config::CombatConfig;
pub use engine::{CardPlay, CombatEngine, EnemyTurnOutcome, process_enemy_turns};
pub use env::{CompositionEntry, EnemyTemplate, HeroTemplate, Rewards, StatBlock, TemplateOracle};
pub use error::{CombatError, ErrorKind, ErrorSeverity, FailureReport, GameError};
pub use event::{CombatEvent, EventSink};
pub use participant::{
    AiPriority, Buff, BuffKind, CombatParticipant, CombatTotals, DamageReport, DamageType,
    DamageTypes, Enemy, EnemyAttack, HealReport, Hero, ParticipantId, ParticipantSnapshot, Side,
    SkipReason, StatusEffect, StatusKind, TickResult, TickSource,
};
pub use resolver::{Dice, DiceError, EffectResult};
pub use rng::{PcgRng, RngSource, ScriptedRng, compute_seed};
pub use state::{CombatPhase, Outcome, Roster, TurnState};

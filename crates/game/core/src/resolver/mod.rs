//! Card resolution.
//!
//! The resolver is a set of stateless functions: dice evaluation, damage and
//! heal rolls, targeting rules and the fixed-order effect application. It
//! reads the roster and mutates participants only through the
//! [`CombatParticipant`](crate::participant::CombatParticipant) contract.

mod damage;
mod dice;
mod effects;
mod targeting;

pub use damage::{CasterProfile, DamageRoll, conditional_applies, roll_damage, roll_heal};
pub use dice::{Dice, DiceError};
pub use effects::{EffectResult, resolve_card};
pub use targeting::{is_legal_target, legal_targets, possible_targets};

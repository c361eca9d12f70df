//! Topic-based event bus for combat events.
//!
//! Sessions publish every [`CombatEvent`](combat_core::CombatEvent) here once
//! the operation that produced it has finished. Consumers subscribe to the
//! topics they care about, either with an [`EventObserver`] called inline or
//! with a channel they drain at their own pace.

mod bus;
mod observer;

pub use bus::{EventBus, EventObserver, SubscriptionId, Topic};
pub use observer::{EventLog, JsonLineObserver};

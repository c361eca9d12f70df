//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use combat_core::CombatEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Combat lifecycle: start, end, rounds and the enemy phase
    Combat,
    /// Hero turn management: turn starts, skips and status ticks
    Turn,
    /// Card plays, target selection and enemy attacks
    Action,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Combat, Topic::Turn, Topic::Action];

    pub fn of(event: &CombatEvent) -> Topic {
        match event {
            CombatEvent::CombatStarted { .. }
            | CombatEvent::CombatEnded { .. }
            | CombatEvent::RoundStarted { .. }
            | CombatEvent::EnemyPhaseStarted { .. } => Topic::Combat,
            CombatEvent::TurnStarted { .. }
            | CombatEvent::TurnSkipped { .. }
            | CombatEvent::StatusTicked { .. } => Topic::Turn,
            CombatEvent::CardUsed { .. }
            | CombatEvent::AreaCardUsed { .. }
            | CombatEvent::EnemyTurnResult(_)
            | CombatEvent::ModeTargetSelection { .. }
            | CombatEvent::SelectionCancelled { .. } => Topic::Action,
        }
    }
}

/// Receives events synchronously as they are published.
pub trait EventObserver: Send {
    fn on_event(&mut self, event: &CombatEvent);
}

impl<F> EventObserver for F
where
    F: FnMut(&CombatEvent) + Send,
{
    fn on_event(&mut self, event: &CombatEvent) {
        self(event)
    }
}

/// Handle returned by every subscription; pass it to
/// [`EventBus::unsubscribe`] to stop delivery.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SubscriptionId(u64);

enum Delivery {
    Observer(Box<dyn EventObserver>),
    Channel(mpsc::UnboundedSender<CombatEvent>),
}

struct Subscription {
    id: SubscriptionId,
    topics: Vec<Topic>,
    delivery: Delivery,
}

/// Topic-based event bus
///
/// Subscribers are served in subscription order, and each one sees events in
/// the order they were published.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` for `topics`.
    pub fn subscribe(
        &mut self,
        topics: &[Topic],
        observer: impl EventObserver + 'static,
    ) -> SubscriptionId {
        self.insert(topics, Delivery::Observer(Box::new(observer)))
    }

    /// Registers `observer` for every topic.
    pub fn subscribe_all(&mut self, observer: impl EventObserver + 'static) -> SubscriptionId {
        self.subscribe(&Topic::ALL, observer)
    }

    /// Subscribe to `topics` through a channel.
    ///
    /// The receiver can be drained synchronously with `try_recv` or awaited
    /// from an async task. Dropping it ends the subscription on the next
    /// publish.
    pub fn subscribe_channel(
        &mut self,
        topics: &[Topic],
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<CombatEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (self.insert(topics, Delivery::Channel(tx)), rx)
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Publish an event to every subscriber of its topic
    pub fn publish(&mut self, event: &CombatEvent) {
        let topic = Topic::of(event);

        self.subscriptions.retain_mut(|subscription| {
            if !subscription.topics.contains(&topic) {
                return true;
            }
            match &mut subscription.delivery {
                Delivery::Observer(observer) => {
                    observer.on_event(event);
                    true
                }
                Delivery::Channel(tx) => {
                    if tx.send(event.clone()).is_err() {
                        tracing::trace!(id = ?subscription.id, "dropping closed event channel");
                        return false;
                    }
                    true
                }
            }
        });
    }

    fn insert(&mut self, topics: &[Topic], delivery: Delivery) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topics: topics.to_vec(),
            delivery,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use combat_core::ParticipantId;

    fn round(round: u32) -> CombatEvent {
        CombatEvent::RoundStarted { round }
    }

    fn skipped() -> CombatEvent {
        CombatEvent::TurnSkipped {
            id: ParticipantId::hero(0),
            reason: combat_core::SkipReason::Incapacitated,
        }
    }

    #[test]
    fn observers_only_see_their_topics_in_order() {
        let mut bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(&[Topic::Combat], move |event: &CombatEvent| {
            sink.lock().unwrap().push(event.clone());
        });

        bus.publish(&round(1));
        bus.publish(&skipped());
        bus.publish(&round(2));

        assert_eq!(*seen.lock().unwrap(), vec![round(1), round(2)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let (id, mut rx) = bus.subscribe_channel(&Topic::ALL);

        bus.publish(&round(1));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&round(2));

        assert_eq!(rx.try_recv().unwrap(), round(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut bus = EventBus::new();
        let (_, rx) = bus.subscribe_channel(&[Topic::Turn]);
        drop(rx);
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(&round(1));
        assert_eq!(bus.subscriber_count(), 1);
        bus.publish(&skipped());
        assert_eq!(bus.subscriber_count(), 0);
    }
}

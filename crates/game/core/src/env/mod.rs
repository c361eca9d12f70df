//! Traits describing read-only content the combat rules consume.
//!
//! The runtime and content loaders implement [`TemplateOracle`]; the rules
//! only ever see templates and validated cards through it.

mod templates;

pub use templates::{CompositionEntry, EnemyTemplate, HeroTemplate, Rewards, StatBlock};

use crate::card::Card;

/// Read-only access to hero/enemy templates and card definitions.
pub trait TemplateOracle: Send + Sync {
    fn hero_template(&self, id: &str) -> Option<&HeroTemplate>;

    fn enemy_template(&self, id: &str) -> Option<&EnemyTemplate>;

    fn card(&self, id: &str) -> Option<&Card>;

    /// Every card whose `owner_class` equals `class`, in a stable order.
    fn cards_for_class(&self, class: &str) -> Vec<&Card>;

    /// Cards dealt to `hero`: its explicit hand when one is listed (unknown
    /// ids are dropped), otherwise every card of its class.
    fn hand_for(&self, hero: &HeroTemplate) -> Vec<Card> {
        if hero.hand.is_empty() {
            return self.cards_for_class(&hero.class).into_iter().cloned().collect();
        }
        hero.hand
            .iter()
            .filter_map(|id| self.card(id).cloned())
            .collect()
    }
}

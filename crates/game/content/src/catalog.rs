//! In-memory content catalog.

use std::collections::HashSet;

use combat_core::{Card, EnemyTemplate, HeroTemplate, TemplateOracle};

/// Problems found while cross-checking loaded content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("hero '{hero}' lists unknown card '{card}'")]
    UnknownCard { hero: String, card: String },

    #[error("hero '{hero}' lists card '{card}' owned by class '{owner}'")]
    ForeignCard {
        hero: String,
        card: String,
        owner: String,
    },

    #[error("hero '{hero}' has no cards to play")]
    EmptyHand { hero: String },
}

/// Hero templates, enemy templates and validated cards, in file order.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    heroes: Vec<HeroTemplate>,
    enemies: Vec<EnemyTemplate>,
    cards: Vec<Card>,
}

impl ContentCatalog {
    pub fn new(heroes: Vec<HeroTemplate>, enemies: Vec<EnemyTemplate>, cards: Vec<Card>) -> Self {
        Self {
            heroes,
            enemies,
            cards,
        }
    }

    pub fn heroes(&self) -> &[HeroTemplate] {
        &self.heroes
    }

    pub fn enemies(&self) -> &[EnemyTemplate] {
        &self.enemies
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Every cross-reference problem in the catalog.
    pub fn problems(&self) -> Vec<CatalogError> {
        let mut problems = Vec::new();
        duplicates("hero", self.heroes.iter().map(|h| h.id.as_str()), &mut problems);
        duplicates("enemy", self.enemies.iter().map(|e| e.id.as_str()), &mut problems);
        duplicates("card", self.cards.iter().map(|c| c.id.as_str()), &mut problems);

        for hero in &self.heroes {
            for card_id in &hero.hand {
                match self.card(card_id) {
                    None => problems.push(CatalogError::UnknownCard {
                        hero: hero.id.clone(),
                        card: card_id.clone(),
                    }),
                    Some(card) if card.owner_class != hero.class => {
                        problems.push(CatalogError::ForeignCard {
                            hero: hero.id.clone(),
                            card: card_id.clone(),
                            owner: card.owner_class.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
            if self.hand_for(hero).is_empty() {
                problems.push(CatalogError::EmptyHand {
                    hero: hero.id.clone(),
                });
            }
        }
        problems
    }

    /// Fails on the first cross-reference problem.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

fn duplicates<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    problems: &mut Vec<CatalogError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            problems.push(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

impl TemplateOracle for ContentCatalog {
    fn hero_template(&self, id: &str) -> Option<&HeroTemplate> {
        self.heroes.iter().find(|hero| hero.id == id)
    }

    fn enemy_template(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    fn cards_for_class(&self, class: &str) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| card.owner_class == class)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CardEffect, StatBlock, TargetMode};

    fn card(id: &str, class: &str) -> Card {
        Card::new(id, class, 1, TargetMode::SelfOnly, &[CardEffect::Shield { amount: 2 }]).unwrap()
    }

    fn catalog() -> ContentCatalog {
        let mut knight = HeroTemplate::new("knight", "Knight", "warrior", StatBlock::new(30, 3, 2));
        knight.hand = vec!["guard".to_string()];
        let mage = HeroTemplate::new("mage", "Mage", "mage", StatBlock::new(18, 4, 0));
        ContentCatalog::new(
            vec![knight, mage],
            vec![EnemyTemplate::new("rat", "Rat", StatBlock::new(5, 1, 0))],
            vec![card("guard", "warrior"), card("ward", "mage"), card("barrier", "mage")],
        )
    }

    #[test]
    fn hands_come_from_list_or_class() {
        let catalog = catalog();
        let knight = catalog.hero_template("knight").unwrap();
        let mage = catalog.hero_template("mage").unwrap();

        let ids = |cards: Vec<Card>| cards.into_iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids(catalog.hand_for(knight)), vec!["guard"]);
        assert_eq!(ids(catalog.hand_for(mage)), vec!["ward", "barrier"]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn reports_cross_reference_problems() {
        let mut catalog = catalog();
        catalog.heroes[0].hand.push("fireball".to_string());
        catalog.heroes[0].hand.push("ward".to_string());
        catalog.cards.push(card("guard", "warrior"));

        let problems = catalog.problems();
        assert!(problems.contains(&CatalogError::DuplicateId {
            kind: "card",
            id: "guard".to_string()
        }));
        assert!(problems.contains(&CatalogError::UnknownCard {
            hero: "knight".to_string(),
            card: "fireball".to_string()
        }));
        assert!(problems.iter().any(|p| matches!(p, CatalogError::ForeignCard { .. })));
    }
}

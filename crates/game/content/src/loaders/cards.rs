//! Card catalog loader.
//!
//! Cards are declared as [`CardDefinition`]s and converted into validated
//! [`Card`]s here, so the resolver never sees a malformed effect set.

use std::path::Path;

use combat_core::{Card, CardDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

/// Loader for card definitions from RON files.
pub struct CardLoader;

impl CardLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Card>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load card catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Card>> {
        let catalog: CardCatalog = ron::from_str(content)?;
        catalog
            .cards
            .into_iter()
            .map(|definition| Card::try_from(definition).map_err(anyhow::Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{DamageType, Dice, StatusKind, TargetMode};

    #[test]
    fn parses_tagged_effects() {
        let cards = CardLoader::parse(
            r#"(
                cards: [
                    (
                        id: "flame_strike",
                        name: Some("Flame Strike"),
                        owner_class: "mage",
                        pa_cost: 2,
                        target_mode: enemy,
                        effects: [
                            damage((base: 2, dice: Some("1d6+1"), damage_type: fire)),
                            critical((chance_percent: 20, multiplier: 1.5)),
                            debuff((kind: burning, duration: 2, periodic_damage: Some(2))),
                        ],
                    ),
                    (
                        id: "guard",
                        owner_class: "warrior",
                        pa_cost: 1,
                        target_mode: self,
                        effects: [shield(amount: 5), cleanse],
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(cards.len(), 2);
        let flame = &cards[0];
        assert_eq!(flame.name, "Flame Strike");
        let damage = flame.effects.damage.as_ref().unwrap();
        assert_eq!(damage.dice, Some(Dice::new(1, 6, 1)));
        assert_eq!(damage.damage_type, DamageType::Fire);
        assert_eq!(flame.effects.debuff.unwrap().kind, StatusKind::Burning);

        let guard = &cards[1];
        assert_eq!(guard.target_mode, TargetMode::SelfOnly);
        assert_eq!(guard.effects.shield, Some(5));
        assert!(guard.effects.cleanse);
    }

    #[test]
    fn rejects_invalid_cards() {
        let orphan = CardLoader::parse(
            r#"(cards: [(
                id: "bad",
                owner_class: "rogue",
                pa_cost: 1,
                target_mode: enemy,
                effects: [critical((chance_percent: 10, multiplier: 2.0))],
            )])"#,
        );
        let message = orphan.unwrap_err().to_string();
        assert!(message.contains("bad"), "{message}");

        let dice = CardLoader::parse(
            r#"(cards: [(
                id: "worse",
                owner_class: "rogue",
                pa_cost: 1,
                target_mode: enemy,
                effects: [damage((base: 1, dice: Some("2x6")))],
            )])"#,
        );
        assert!(dice.is_err());
    }
}

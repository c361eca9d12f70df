//! Shared fixtures for session tests.
#![allow(dead_code)]

use combat_content::ContentCatalog;
use combat_core::{
    Card, CardEffect, CompositionEntry, DamageSpec, DamageType, Dice, EnemyTemplate, HealSpec,
    HeroTemplate, Rewards, StatBlock, TargetMode,
};
use combat_runtime::{CardSelection, CombatSession, EventLog, RuntimeConfig};

fn card(id: &str, class: &str, cost: u32, mode: TargetMode, effect: CardEffect) -> Card {
    Card::new(id, class, cost, mode, &[effect]).unwrap()
}

fn damage(base: u32, dice: Option<Dice>) -> CardEffect {
    CardEffect::Damage(DamageSpec {
        base,
        dice,
        damage_type: DamageType::Physical,
    })
}

/// Knight (warrior) and cleric (priest) against rats and an ogre.
///
/// * `strike`: 1d1 to one enemy, 1 PA. With attack 3 it deals 4.
/// * `sweep`: flat 1 to every enemy, 2 PA. With attack 3 it deals 4.
/// * `guard`: 5 shield on self, 1 PA.
/// * `mend`: heal 4 on one ally, 1 PA.
pub fn catalog() -> ContentCatalog {
    let knight = HeroTemplate::new("knight", "Knight", "warrior", StatBlock::new(30, 3, 2));
    let cleric = HeroTemplate::new("cleric", "Cleric", "priest", StatBlock::new(20, 1, 0));
    let mut squire = HeroTemplate::new("squire", "Squire", "warrior", StatBlock::new(10, 3, 0));
    squire.stats.hp = Some(1);

    let mut rat = EnemyTemplate::new("rat", "Rat", StatBlock::new(4, 2, 0));
    rat.rewards = Rewards { xp: 5, gold: 2 };
    let ogre = EnemyTemplate::new("ogre", "Ogre", StatBlock::new(40, 12, 1));

    ContentCatalog::new(
        vec![knight, cleric, squire],
        vec![rat, ogre],
        vec![
            card("strike", "warrior", 1, TargetMode::Enemy, damage(0, Some(Dice::new(1, 1, 0)))),
            card("sweep", "warrior", 2, TargetMode::AllEnemies, damage(1, None)),
            card("guard", "warrior", 1, TargetMode::SelfOnly, CardEffect::Shield { amount: 5 }),
            card(
                "mend",
                "priest",
                1,
                TargetMode::Ally,
                CardEffect::Heal(HealSpec { base: 4, dice: None }),
            ),
        ],
    )
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig::default().with_seed(7)
}

pub fn session(party: &[&str], config: RuntimeConfig) -> (CombatSession, EventLog) {
    let mut session = CombatSession::builder()
        .config(config)
        .oracle(catalog())
        .party(party.iter().copied())
        .build()
        .unwrap();
    let log = EventLog::new();
    session.event_bus().subscribe_all(log.clone());
    (session, log)
}

pub fn rats(count: usize) -> Vec<CompositionEntry> {
    (0..count)
        .map(|i| CompositionEntry::new("rat").at(format!("slot_{i}")))
        .collect()
}

/// Plays the first card the active hero can use, then ends its turn.
///
/// Cards needing a target go to the first legal one; cards with no legal
/// target are cancelled. Runs the enemy phase by hand when the session does
/// not.
pub fn autoplay(session: &mut CombatSession, max_steps: usize) {
    for _ in 0..max_steps {
        if !session.is_active() {
            return;
        }
        let Some(active) = session.turn_state().active else {
            session.process_enemy_phase().unwrap();
            continue;
        };

        let hero = session.roster().hero(active).unwrap();
        let affordable: Vec<String> = hero
            .hand()
            .iter()
            .filter(|card| hero.can_afford(card.pa_cost))
            .map(|card| card.id.clone())
            .collect();

        let mut played = false;
        for card_id in affordable {
            match session.select_card(&card_id).unwrap() {
                CardSelection::Resolved(_) => played = true,
                CardSelection::AwaitingTarget { legal_targets, .. } => {
                    match legal_targets.first() {
                        Some(&target) => {
                            session.select_target(target).unwrap();
                            played = true;
                        }
                        None => session.cancel_selection().unwrap(),
                    }
                }
            }
            if played {
                break;
            }
        }
        if !played && session.is_active() {
            session.end_turn().unwrap();
        }
    }
}

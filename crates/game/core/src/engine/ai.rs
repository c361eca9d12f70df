//! Enemy decision making.

use crate::participant::{
    AiPriority, CombatParticipant, Enemy, EnemyAttack, Hero, StatusKind,
};
use crate::rng::RngSource;

/// Picks the hero `enemy` attacks, as an index into `heroes`.
///
/// An active provoke wins as long as the provoking hero is still standing;
/// otherwise the enemy's priority policy decides. Ties keep party order.
/// Returns `None` when every hero is down.
pub fn select_target(enemy: &Enemy, heroes: &[Hero], rng: &mut dyn RngSource) -> Option<usize> {
    let standing: Vec<usize> = heroes
        .iter()
        .enumerate()
        .filter(|(_, hero)| !hero.is_incapacitated())
        .map(|(index, _)| index)
        .collect();
    if standing.is_empty() {
        return None;
    }

    let provoker = enemy
        .statuses()
        .get(StatusKind::Provoked)
        .and_then(|provoke| provoke.origin);
    if let Some(origin) = provoker {
        if let Some(&index) = standing.iter().find(|&&index| heroes[index].id() == origin) {
            return Some(index);
        }
    }

    match enemy.ai_priority() {
        AiPriority::LowestHp => standing.iter().copied().min_by_key(|&index| heroes[index].hp()),
        AiPriority::HighestDamageDealt => standing.iter().copied().fold(None, |best, index| {
            match best {
                Some(current)
                    if heroes[current].totals().damage_dealt
                        >= heroes[index].totals().damage_dealt =>
                {
                    Some(current)
                }
                _ => Some(index),
            }
        }),
        AiPriority::FirstEligible => standing.first().copied(),
        AiPriority::Random => rng.pick_index(standing.len()).map(|pick| standing[pick]),
    }
}

/// Uniformly random attack from the repertoire, or a basic attack built from
/// the attack stat when the repertoire is empty.
pub fn select_attack(enemy: &Enemy, rng: &mut dyn RngSource) -> EnemyAttack {
    let attacks = enemy.attacks();
    rng.pick_index(attacks.len())
        .and_then(|index| attacks.get(index))
        .cloned()
        .unwrap_or_else(|| EnemyAttack::basic(enemy.attack()))
}

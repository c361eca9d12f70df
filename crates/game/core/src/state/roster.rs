use crate::env::Rewards;
use crate::participant::{CombatParticipant, Enemy, Hero, ParticipantId, ParticipantSnapshot};

/// Heroes and enemies taking part in one encounter.
///
/// Heroes keep party order (which is also turn order). Enemies keep the
/// order of the composition they were built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    pub heroes: Vec<Hero>,
    pub enemies: Vec<Enemy>,
}

impl Roster {
    pub fn new(heroes: Vec<Hero>, enemies: Vec<Enemy>) -> Self {
        Self { heroes, enemies }
    }

    pub fn hero(&self, id: ParticipantId) -> Option<&Hero> {
        self.heroes.iter().find(|hero| hero.id() == id)
    }

    pub fn hero_mut(&mut self, id: ParticipantId) -> Option<&mut Hero> {
        self.heroes.iter_mut().find(|hero| hero.id() == id)
    }

    pub fn enemy(&self, id: ParticipantId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id() == id)
    }

    pub fn enemy_mut(&mut self, id: ParticipantId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id() == id)
    }

    /// Looks up any participant by id.
    pub fn participant(&self, id: ParticipantId) -> Option<&dyn CombatParticipant> {
        if id.is_enemy() {
            self.enemy(id).map(|enemy| enemy as &dyn CombatParticipant)
        } else {
            self.hero(id).map(|hero| hero as &dyn CombatParticipant)
        }
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut dyn CombatParticipant> {
        if id.is_enemy() {
            self.enemy_mut(id)
                .map(|enemy| enemy as &mut dyn CombatParticipant)
        } else {
            self.hero_mut(id).map(|hero| hero as &mut dyn CombatParticipant)
        }
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.participant(id).is_some()
    }

    /// Every participant id: heroes first in party order, then enemies.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.heroes
            .iter()
            .map(|hero| hero.id())
            .chain(self.enemies.iter().map(|enemy| enemy.id()))
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| !enemy.is_defeated())
    }

    /// True when the encounter has enemies and every one of them is down.
    pub fn all_enemies_defeated(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(Enemy::is_defeated)
    }

    pub fn all_heroes_incapacitated(&self) -> bool {
        self.heroes.iter().all(|hero| hero.is_incapacitated())
    }

    /// Sum of the rewards carried by defeated enemies.
    pub fn rewards(&self) -> Rewards {
        self.enemies
            .iter()
            .filter(|enemy| enemy.is_defeated())
            .fold(Rewards::default(), |total, enemy| total.add(enemy.rewards()))
    }

    pub fn hero_snapshots(&self) -> Vec<ParticipantSnapshot> {
        self.heroes.iter().map(|hero| hero.snapshot()).collect()
    }

    pub fn enemy_snapshots(&self) -> Vec<ParticipantSnapshot> {
        self.enemies.iter().map(|enemy| enemy.snapshot()).collect()
    }
}

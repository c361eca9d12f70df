use crate::card::Card;
use crate::env::HeroTemplate;

use super::{
    Buff, BuffKind, Buffs, CombatParticipant, ParticipantId, ParticipantSnapshot, Side, Vitals,
};

/// Player-controlled participant.
///
/// Hp persists between combats. Action points, buffs, debuffs and the shield
/// buffer are combat-scoped and reset by [`Hero::reset_for_combat`].
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    id: ParticipantId,
    name: String,
    class: String,
    template_id: String,
    vitals: Vitals,
    action_points: u32,
    action_points_max: u32,
    hand: Vec<Card>,
    shield: u32,
    buffs: Buffs,
}

impl Hero {
    pub fn from_template(id: ParticipantId, template: &HeroTemplate, hand: Vec<Card>) -> Self {
        let stats = &template.stats;
        let vitals = Vitals::new(
            stats.hp_max,
            stats.hp.unwrap_or(stats.hp_max),
            stats.attack,
            stats.defense,
        )
        .with_regen(stats.regen.unwrap_or(0));
        let action_points_max = stats.pa_max.unwrap_or(HeroTemplate::DEFAULT_PA_MAX);

        Self {
            id,
            name: template.name.clone(),
            class: template.class.clone(),
            template_id: template.id.clone(),
            vitals,
            action_points: action_points_max,
            action_points_max,
            hand,
            shield: 0,
            buffs: Buffs::empty(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    pub fn action_points_max(&self) -> u32 {
        self.action_points_max
    }

    pub fn restore_action_points(&mut self) {
        self.action_points = self.action_points_max;
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.action_points >= cost
    }

    /// Spends action points. Returns false without spending if unaffordable.
    pub fn spend_action_points(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.action_points -= cost;
        true
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.hand.iter().find(|card| card.id == card_id)
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn buffs(&self) -> &Buffs {
        &self.buffs
    }

    /// Clears combat-scoped resources; hp is left untouched.
    pub fn reset_for_combat(&mut self) {
        self.restore_action_points();
        self.buffs.clear();
        self.vitals.statuses.clear();
        self.shield = 0;
        self.vitals.totals.reset();
    }
}

impl CombatParticipant for Hero {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        Side::Heroes
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn defense(&self) -> u32 {
        self.vitals.defense + self.buffs.total(BuffKind::Defense)
    }

    fn attack_bonus(&self) -> u32 {
        self.buffs.total(BuffKind::Attack)
    }

    fn regeneration(&self) -> u32 {
        self.vitals.regen + self.buffs.total(BuffKind::Regeneration)
    }

    fn evasion_chance(&self) -> u32 {
        self.buffs.total(BuffKind::Evasion).min(100)
    }

    fn absorb(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        absorbed
    }

    fn on_defeated(&mut self) {
        self.vitals.incapacitated = true;
        self.vitals.statuses.clear();
        self.buffs.clear();
        self.shield = 0;
    }

    fn on_status_tick(&mut self) {
        self.buffs.decrement();
    }

    fn add_shield(&mut self, amount: u32) -> bool {
        if self.vitals.incapacitated {
            return false;
        }
        self.shield = self.shield.saturating_add(amount);
        true
    }

    fn apply_buff(&mut self, buff: Buff) -> bool {
        if self.vitals.incapacitated {
            return false;
        }
        self.buffs.apply(buff)
    }

    fn snapshot(&self) -> ParticipantSnapshot {
        let mut snapshot = ParticipantSnapshot::from_participant(self);
        snapshot.template_id = Some(self.template_id.clone());
        snapshot.class = Some(self.class.clone());
        snapshot.action_points = Some(self.action_points);
        snapshot.action_points_max = Some(self.action_points_max);
        snapshot.shield = self.shield;
        snapshot.buffs = self.buffs.iter().copied().collect();
        snapshot.hand = self.hand.iter().map(|card| card.id.clone()).collect();
        snapshot
    }
}

use crate::card::DebuffSpec;
use crate::config::CombatConfig;
use crate::env::{EnemyTemplate, Rewards};

use super::{
    CombatParticipant, DamageType, DamageTypes, ParticipantId, ParticipantSnapshot, Side, Vitals,
};

/// Target-priority policy used by enemy AI when no provoke overrides it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AiPriority {
    /// Standing hero with the lowest current hp.
    #[default]
    LowestHp,
    /// Standing hero that has dealt the most damage this combat.
    HighestDamageDealt,
    /// First standing hero in turn order.
    FirstEligible,
    /// Uniformly random standing hero.
    Random,
}

/// One entry of an enemy's attack repertoire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAttack {
    pub name: String,
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    /// Status applied to the target when the attack lands.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inflicts: Option<DebuffSpec>,
    /// Hp the attacker heals itself when the attack lands.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lifesteal: u32,
}

impl EnemyAttack {
    /// Attack used when the repertoire is empty.
    pub fn basic(attack: u32) -> Self {
        Self {
            name: "attack".to_string(),
            damage: attack,
            damage_type: DamageType::Physical,
            inflicts: None,
            lifesteal: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    id: ParticipantId,
    name: String,
    template_id: String,
    placement: Option<String>,
    vitals: Vitals,
    ai_priority: AiPriority,
    attacks: Vec<EnemyAttack>,
    vulnerabilities: DamageTypes,
    resistances: DamageTypes,
    boss_phases: u32,
    current_phase: u32,
    rewards: Rewards,
}

impl Enemy {
    pub fn from_template(
        id: ParticipantId,
        template: &EnemyTemplate,
        placement: Option<String>,
    ) -> Self {
        let stats = &template.stats;
        let vitals = Vitals::new(
            stats.hp_max,
            stats.hp.unwrap_or(stats.hp_max),
            stats.attack,
            stats.defense,
        )
        .with_regen(stats.regen.unwrap_or(0));

        Self {
            id,
            name: template.name.clone(),
            template_id: template.id.clone(),
            placement,
            vitals,
            ai_priority: template.ai_priority,
            attacks: template.attacks.clone(),
            vulnerabilities: template.vulnerabilities.iter().copied().collect(),
            resistances: template.resistances.iter().copied().collect(),
            boss_phases: template.boss_phases.unwrap_or(1).max(1),
            current_phase: 1,
            rewards: template.rewards,
        }
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn placement(&self) -> Option<&str> {
        self.placement.as_deref()
    }

    pub fn ai_priority(&self) -> AiPriority {
        self.ai_priority
    }

    pub fn attacks(&self) -> &[EnemyAttack] {
        &self.attacks
    }

    pub fn is_boss(&self) -> bool {
        self.boss_phases > 1
    }

    pub fn current_phase(&self) -> u32 {
        self.current_phase
    }

    pub fn boss_phases(&self) -> u32 {
        self.boss_phases
    }

    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn is_defeated(&self) -> bool {
        self.vitals.incapacitated
    }
}

impl CombatParticipant for Enemy {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        Side::Enemies
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn vulnerabilities(&self) -> DamageTypes {
        self.vulnerabilities
    }

    fn resistances(&self) -> DamageTypes {
        self.resistances
    }

    fn try_advance_phase(&mut self, config: &CombatConfig) -> bool {
        if self.current_phase >= self.boss_phases {
            return false;
        }
        self.current_phase += 1;
        let restored = self
            .vitals
            .hp_max
            .saturating_mul(config.boss_phase_restore_percent)
            / 100;
        self.vitals.hp = restored.clamp(1, self.vitals.hp_max);
        true
    }

    fn snapshot(&self) -> ParticipantSnapshot {
        let mut snapshot = ParticipantSnapshot::from_participant(self);
        snapshot.template_id = Some(self.template_id.clone());
        snapshot.placement = self.placement.clone();
        snapshot.boss_phase = self.is_boss().then_some((self.current_phase, self.boss_phases));
        snapshot.vulnerabilities = self.vulnerabilities.to_vec();
        snapshot.resistances = self.resistances.to_vec();
        snapshot
    }
}

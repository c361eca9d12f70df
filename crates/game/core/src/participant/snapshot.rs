use super::{
    Buff, CombatParticipant, CombatTotals, DamageType, ParticipantId, Side, StatusEffect,
};

/// Serializable, reference-free view of a participant.
///
/// Snapshots are what presentation collaborators receive; they never see
/// live participant objects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub name: String,
    pub side: Side,
    pub template_id: Option<String>,
    pub class: Option<String>,
    pub hp: u32,
    pub hp_max: u32,
    pub attack: u32,
    pub defense: u32,
    pub shield: u32,
    pub action_points: Option<u32>,
    pub action_points_max: Option<u32>,
    pub statuses: Vec<StatusEffect>,
    pub buffs: Vec<Buff>,
    pub hand: Vec<String>,
    pub incapacitated: bool,
    pub marked: bool,
    /// `(current, total)` for bosses.
    pub boss_phase: Option<(u32, u32)>,
    pub vulnerabilities: Vec<DamageType>,
    pub resistances: Vec<DamageType>,
    pub placement: Option<String>,
    pub totals: CombatTotals,
}

impl ParticipantSnapshot {
    /// Fills the fields every participant shares; variants add the rest.
    pub fn from_participant<P: CombatParticipant + ?Sized>(participant: &P) -> Self {
        Self {
            id: participant.id(),
            name: participant.name().to_string(),
            side: participant.side(),
            template_id: None,
            class: None,
            hp: participant.hp(),
            hp_max: participant.hp_max(),
            attack: participant.attack(),
            defense: participant.defense(),
            shield: 0,
            action_points: None,
            action_points_max: None,
            statuses: participant.statuses().iter().copied().collect(),
            buffs: Vec::new(),
            hand: Vec::new(),
            incapacitated: participant.is_incapacitated(),
            marked: participant.is_marked(),
            boss_phase: None,
            vulnerabilities: Vec::new(),
            resistances: Vec::new(),
            placement: None,
            totals: participant.totals(),
        }
    }
}

//! Damage types, affinity sets and the reports produced by hp changes.

use bitflags::bitflags;

/// Damage type for resistances and vulnerabilities.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageType {
    /// Melee strikes, arrows, claws.
    #[default]
    Physical,
    Fire,
    Ice,
    Lightning,
    Poison,
    Holy,
    Shadow,
    Arcane,
}

bitflags! {
    /// Set of damage types an enemy is vulnerable or resistant to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DamageTypes: u8 {
        const PHYSICAL  = 1 << 0;
        const FIRE      = 1 << 1;
        const ICE       = 1 << 2;
        const LIGHTNING = 1 << 3;
        const POISON    = 1 << 4;
        const HOLY      = 1 << 5;
        const SHADOW    = 1 << 6;
        const ARCANE    = 1 << 7;
    }
}

impl From<DamageType> for DamageTypes {
    fn from(value: DamageType) -> Self {
        match value {
            DamageType::Physical => Self::PHYSICAL,
            DamageType::Fire => Self::FIRE,
            DamageType::Ice => Self::ICE,
            DamageType::Lightning => Self::LIGHTNING,
            DamageType::Poison => Self::POISON,
            DamageType::Holy => Self::HOLY,
            DamageType::Shadow => Self::SHADOW,
            DamageType::Arcane => Self::ARCANE,
        }
    }
}

impl FromIterator<DamageType> for DamageTypes {
    fn from_iter<I: IntoIterator<Item = DamageType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | Self::from(kind))
    }
}

impl DamageTypes {
    /// Returns true if `kind` is a member of this set.
    pub fn includes(&self, kind: DamageType) -> bool {
        self.contains(Self::from(kind))
    }

    /// Expands the set back into individual damage types.
    pub fn to_vec(&self) -> Vec<DamageType> {
        use strum::IntoEnumIterator;
        DamageType::iter().filter(|kind| self.includes(*kind)).collect()
    }
}

/// Outcome of an hp reduction, shared by hits and periodic damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpLoss {
    /// Hp actually removed (never more than the hp the participant had).
    pub lost: u32,
    pub defeated: bool,
    /// A boss dropped to zero and advanced to its next phase instead of dying.
    pub phase_transition: bool,
}

/// Result of [`receive_damage`](super::CombatParticipant::receive_damage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Damage after affinities, mark bonus and defense (minimum 1).
    pub final_amount: u32,
    /// Portion of `final_amount` soaked by a shield buffer.
    pub absorbed: u32,
    pub defeated: bool,
    pub resisted: bool,
    pub vulnerable: bool,
    pub phase_transition: bool,
}

/// Result of [`receive_heal`](super::CombatParticipant::receive_heal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealReport {
    pub healed: bool,
    /// Hp actually restored after clamping to `hp_max`.
    pub amount: u32,
    pub new_hp: u32,
}

/// Applies the affinity part of the damage pipeline.
///
/// Vulnerability doubles first, then resistance halves (floored); both may apply.
pub fn apply_affinities(
    amount: u32,
    damage_type: DamageType,
    vulnerabilities: DamageTypes,
    resistances: DamageTypes,
) -> (u32, bool, bool) {
    let mut adjusted = amount;
    let vulnerable = vulnerabilities.includes(damage_type);
    if vulnerable {
        adjusted = adjusted.saturating_mul(2);
    }
    let resisted = resistances.includes(damage_type);
    if resisted {
        adjusted /= 2;
    }
    (adjusted, resisted, vulnerable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vulnerability_applies_before_resistance() {
        let vulnerable = DamageTypes::FIRE;
        let resistant = DamageTypes::FIRE;

        // 7 * 2 = 14, 14 / 2 = 7; the reverse order would give 6
        assert_eq!(
            apply_affinities(7, DamageType::Fire, vulnerable, resistant),
            (7, true, true)
        );
        assert_eq!(
            apply_affinities(7, DamageType::Fire, DamageTypes::empty(), resistant),
            (3, true, false)
        );
        assert_eq!(
            apply_affinities(7, DamageType::Ice, vulnerable, resistant),
            (7, false, false)
        );
    }

    #[test]
    fn damage_types_collect_from_list() {
        let set: DamageTypes = [DamageType::Fire, DamageType::Holy].into_iter().collect();
        assert!(set.includes(DamageType::Holy));
        assert!(!set.includes(DamageType::Ice));
        assert_eq!(set.to_vec(), vec![DamageType::Fire, DamageType::Holy]);
    }
}

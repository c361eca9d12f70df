/// Combat tuning constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Bonus damage taken by a marked participant when the mark carries no magnitude.
    pub mark_bonus: u32,

    /// Share of `hp_max` a boss keeps after advancing to its next phase.
    pub boss_phase_restore_percent: u32,

    /// Chance (percent) that a feared participant loses its action on each check.
    pub fear_skip_percent: u32,

    /// Threshold for the `target_hp_below` conditional predicate.
    pub low_hp_threshold_percent: u32,

    /// Maximum absolute jitter applied to enemy attack damage.
    pub enemy_damage_jitter: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 12;
    pub const MAX_BUFFS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MARK_BONUS: u32 = 4;
    pub const DEFAULT_BOSS_PHASE_RESTORE_PERCENT: u32 = 50;
    pub const DEFAULT_FEAR_SKIP_PERCENT: u32 = 50;
    pub const DEFAULT_LOW_HP_THRESHOLD_PERCENT: u32 = 30;
    pub const DEFAULT_ENEMY_DAMAGE_JITTER: u32 = 1;

    pub fn new() -> Self {
        Self {
            mark_bonus: Self::DEFAULT_MARK_BONUS,
            boss_phase_restore_percent: Self::DEFAULT_BOSS_PHASE_RESTORE_PERCENT,
            fear_skip_percent: Self::DEFAULT_FEAR_SKIP_PERCENT,
            low_hp_threshold_percent: Self::DEFAULT_LOW_HP_THRESHOLD_PERCENT,
            enemy_damage_jitter: Self::DEFAULT_ENEMY_DAMAGE_JITTER,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

//! Session configuration.

use combat_core::CombatConfig;

/// Runtime configuration shared by every combat a session runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Base seed for per-combat random streams. A random seed is drawn when
    /// absent, so two sessions only replay identically with a fixed seed.
    pub seed: Option<u64>,
    /// Run the enemy phase as soon as the last hero ends its turn. Callers
    /// that pace enemy turns themselves turn this off and call
    /// `CombatSession::process_enemy_phase`.
    pub auto_enemy_phase: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            seed: None,
            auto_enemy_phase: true,
        }
    }
}

impl RuntimeConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_auto_enemy_phase(mut self, enabled: bool) -> Self {
        self.auto_enemy_phase = enabled;
        self
    }

    /// The configured seed, or a fresh random one.
    pub(crate) fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

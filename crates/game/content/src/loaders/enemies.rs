//! Enemy bestiary loader.

use std::path::Path;

use combat_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Bestiary structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bestiary {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file.
    ///
    /// Rider statuses on attacks are validated here so a bad bestiary fails
    /// at load time rather than mid-combat.
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let bestiary: Bestiary = ron::from_str(content)?;
        for enemy in &bestiary.enemies {
            for attack in &enemy.attacks {
                if let Some(rider) = &attack.inflicts {
                    rider.validate().map_err(|e| {
                        anyhow::anyhow!(
                            "enemy '{}' attack '{}': {}",
                            enemy.id,
                            attack.name,
                            e
                        )
                    })?;
                }
            }
        }
        Ok(bestiary.enemies)
    }
}

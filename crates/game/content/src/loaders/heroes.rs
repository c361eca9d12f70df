//! Hero roster loader.

use std::path::Path;

use combat_core::HeroTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Hero roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroRoster {
    pub heroes: Vec<HeroTemplate>,
}

/// Loader for hero templates from RON files.
pub struct HeroLoader;

impl HeroLoader {
    /// Load hero templates from a RON file, in party order.
    pub fn load(path: &Path) -> LoadResult<Vec<HeroTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<HeroTemplate>> {
        let roster: HeroRoster = ron::from_str(content)?;
        Ok(roster.heroes)
    }
}

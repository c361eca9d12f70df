//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use combat_core::{Card, CombatConfig, EnemyTemplate, HeroTemplate};

use crate::catalog::ContentCatalog;
use crate::loaders::{CardLoader, ConfigLoader, EnemyLoader, HeroLoader, LoadResult};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── heroes.ron
/// ├── enemies.ron
/// └── cards.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "combat.toml";
    pub const HEROES_FILE: &'static str = "heroes.ron";
    pub const ENEMIES_FILE: &'static str = "enemies.ron";
    pub const CARDS_FILE: &'static str = "cards.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat tuning from `combat.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_heroes(&self) -> LoadResult<Vec<HeroTemplate>> {
        HeroLoader::load(&self.data_dir.join(Self::HEROES_FILE))
    }

    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join(Self::ENEMIES_FILE))
    }

    pub fn load_cards(&self) -> LoadResult<Vec<Card>> {
        CardLoader::load(&self.data_dir.join(Self::CARDS_FILE))
    }

    /// Loads heroes, enemies and cards into a cross-checked catalog.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let catalog = ContentCatalog::new(
            self.load_heroes()?,
            self.load_enemies()?,
            self.load_cards()?,
        );
        catalog.validate()?;
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

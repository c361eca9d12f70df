//! Content loaders for reading combat data from files.
//!
//! RON holds templates and cards; TOML holds tuning. Every loader returns
//! [`LoadResult`] with the offending file named in the error.

pub mod cards;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod heroes;

pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use heroes::HeroLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

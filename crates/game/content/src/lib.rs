//! Data-driven combat content and its loaders.
//!
//! This crate houses hero templates, enemy templates and card definitions,
//! and provides loaders for the RON/TOML files they live in:
//! - Hero roster (`heroes.ron`)
//! - Enemy bestiary (`enemies.ron`)
//! - Card catalog (`cards.ron`), validated into [`combat_core::Card`] on load
//! - Combat tuning (`combat.toml`)
//!
//! Content is consumed through [`combat_core::TemplateOracle`] and never
//! appears in combat state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, ContentCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{CardLoader, ConfigLoader, ContentFactory, EnemyLoader, HeroLoader};

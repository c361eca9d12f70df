//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_content;
mod simulate;

pub use check_content::CheckContent;
pub use simulate::Simulate;

use std::path::PathBuf;

use combat_content::ContentFactory;

/// Content factory for `dir`, or the content bundled with `combat-content`.
fn content_factory(dir: Option<PathBuf>) -> ContentFactory {
    match dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    }
}

//! Load a content directory and report cross-reference problems.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use combat_core::TemplateOracle;

/// Load and cross-check a content directory
#[derive(Parser)]
pub struct CheckContent {
    /// Content directory (defaults to the bundled content)
    #[arg(short, long, value_name = "DIR")]
    content: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let factory = super::content_factory(self.content);
        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            factory.data_dir().display()
        );

        let config = factory.load_config().context("Failed to load combat config")?;
        let heroes = factory.load_heroes().context("Failed to load heroes")?;
        let enemies = factory.load_enemies().context("Failed to load enemies")?;
        let cards = factory.load_cards().context("Failed to load cards")?;
        let catalog = combat_content::ContentCatalog::new(heroes, enemies, cards);

        println!(
            "  {} heroes, {} enemies, {} cards",
            catalog.heroes().len(),
            catalog.enemies().len(),
            catalog.cards().len()
        );
        println!(
            "  mark bonus {}, boss restore {}%, fear skip {}%, low hp {}%, jitter ±{}",
            config.mark_bonus,
            config.boss_phase_restore_percent,
            config.fear_skip_percent,
            config.low_hp_threshold_percent,
            config.enemy_damage_jitter
        );
        println!();

        for hero in catalog.heroes() {
            let hand: Vec<String> = catalog
                .hand_for(hero)
                .into_iter()
                .map(|card| card.id)
                .collect();
            println!(
                "  {} ({}): {}",
                style(&hero.id).bold(),
                hero.class,
                hand.join(", ")
            );
        }
        println!();

        let problems = catalog.problems();
        if problems.is_empty() {
            println!("{}", style("No problems found").green());
            return Ok(());
        }

        for problem in &problems {
            println!("  {} {}", style("✗").red(), problem);
        }
        anyhow::bail!("{} content problem(s) found", problems.len())
    }
}

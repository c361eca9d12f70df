//! Auto-play an encounter from a content directory.
//!
//! Heroes follow a naive policy: play the first affordable card in hand on
//! its first legal target, and end the turn once nothing is playable.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing::{debug, warn};

use combat_core::{CombatEvent, CompositionEntry, EnemyTurnOutcome};
use combat_runtime::{CardSelection, CombatSession, JsonLineObserver, RuntimeConfig, Topic};

/// Auto-play an encounter and print its events
#[derive(Parser)]
pub struct Simulate {
    /// Content directory (defaults to the bundled content)
    #[arg(short, long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Hero template ids in turn order
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "knight,mage,cleric,rogue"
    )]
    party: Vec<String>,

    /// Enemy template ids, optionally with a placement (`goblin@left`)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "goblin,skeleton,cave_spider"
    )]
    enemies: Vec<String>,

    /// Base seed (falls back to COMBAT_SEED, then a random seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many hero actions even if the combat is undecided
    #[arg(long, default_value_t = 500)]
    max_steps: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One readable line per event
    Summary,
    /// One JSON object per event
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = super::content_factory(self.content);
        let combat = factory.load_config().context("Failed to load combat config")?;
        let catalog = factory
            .load_catalog()
            .with_context(|| format!("Failed to load content from {}", factory.data_dir().display()))?;

        let mut config = RuntimeConfig::default().with_combat(combat);
        if let Some(seed) = self.seed.or_else(seed_from_env) {
            config = config.with_seed(seed);
        }

        let mut session = CombatSession::builder()
            .config(config)
            .oracle(catalog)
            .party(self.party)
            .build()?;

        match self.format {
            OutputFormat::Json => {
                session.subscribe(&Topic::ALL, JsonLineObserver::new(std::io::stdout()));
            }
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Seed:").bold().cyan(),
                    session.base_seed()
                );
                session.subscribe(&Topic::ALL, |event: &CombatEvent| {
                    println!("{}", describe(event));
                });
            }
        }

        let composition: Vec<CompositionEntry> =
            self.enemies.iter().map(|raw| parse_entry(raw)).collect();
        debug!(
            seed = session.base_seed(),
            enemies = composition.len(),
            max_steps = self.max_steps,
            "starting simulation"
        );
        session.start_combat(&composition, false)?;

        let mut steps = 0;
        while session.is_active() && steps < self.max_steps {
            take_action(&mut session)?;
            steps += 1;
        }
        if session.is_active() {
            warn!(steps, "step limit reached before the combat was decided");
        }

        if let OutputFormat::Summary = self.format {
            println!();
            match session.outcome() {
                Some(outcome) => {
                    let rewards = session.rewards();
                    println!(
                        "{} {} after {} round(s), {} xp, {} gold",
                        style("Result:").bold().cyan(),
                        style(outcome).bold(),
                        session.turn_state().round,
                        rewards.xp,
                        rewards.gold
                    );
                }
                None => println!(
                    "{} undecided after {} steps",
                    style("Result:").bold().yellow(),
                    steps
                ),
            }
        }
        Ok(())
    }
}

fn seed_from_env() -> Option<u64> {
    std::env::var("COMBAT_SEED").ok()?.parse().ok()
}

fn parse_entry(raw: &str) -> CompositionEntry {
    match raw.split_once('@') {
        Some((template, placement)) => CompositionEntry::new(template).at(placement),
        None => CompositionEntry::new(raw),
    }
}

/// Plays one card for the active hero, or ends its turn when nothing in
/// hand can be played.
fn take_action(session: &mut CombatSession) -> Result<()> {
    let Some(active) = session.turn_state().active else {
        session.process_enemy_phase()?;
        return Ok(());
    };

    let affordable: Vec<String> = match session.roster().hero(active) {
        Some(hero) => hero
            .hand()
            .iter()
            .filter(|card| hero.can_afford(card.pa_cost))
            .map(|card| card.id.clone())
            .collect(),
        None => Vec::new(),
    };

    for card_id in affordable {
        match session.select_card(&card_id)? {
            CardSelection::Resolved(_) => return Ok(()),
            CardSelection::AwaitingTarget { legal_targets, .. } => match legal_targets.first() {
                Some(&target) => {
                    session.select_target(target)?;
                    return Ok(());
                }
                None => session.cancel_selection()?,
            },
        }
    }

    session.end_turn()?;
    Ok(())
}

fn describe(event: &CombatEvent) -> String {
    let name = style(event.name()).bold().green();
    match event {
        CombatEvent::CombatStarted { heroes, enemies } => {
            let names = |side: &[combat_core::ParticipantSnapshot]| {
                side.iter()
                    .map(|p| format!("{} {} ({}/{})", p.id, p.name, p.hp, p.hp_max))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!("{name} heroes: {} | enemies: {}", names(heroes), names(enemies))
        }
        CombatEvent::TurnStarted {
            active_id, round, ..
        } => match active_id {
            Some(id) => format!("{name} round {round}, {id} acts"),
            None => format!("{name} round {round}"),
        },
        CombatEvent::TurnSkipped { id, reason } => format!("{name} {id}: {reason:?}"),
        CombatEvent::StatusTicked { id, results } => format!("{name} {id}: {results:?}"),
        CombatEvent::CardUsed {
            card,
            user,
            target,
            results,
        } => format!(
            "{name} {user} plays {card} on {target}: {}",
            effects(results)
        ),
        CombatEvent::AreaCardUsed {
            card,
            user,
            results,
        } => format!("{name} {user} plays {card}: {}", effects(results)),
        CombatEvent::RoundStarted { round } | CombatEvent::EnemyPhaseStarted { round } => {
            format!("{name} round {round}")
        }
        CombatEvent::EnemyTurnResult(outcome) => format!("{name} {}", enemy_turn(outcome)),
        CombatEvent::ModeTargetSelection {
            card,
            legal_targets,
            ..
        } => format!("{name} {card} -> {legal_targets:?}"),
        CombatEvent::SelectionCancelled { card } => format!("{name} {card}"),
        CombatEvent::CombatEnded {
            outcome,
            rounds,
            rewards_summary,
        } => format!("{name} {outcome} in {rounds} round(s), rewards {rewards_summary:?}"),
    }
}

fn effects(results: &[combat_core::EffectResult]) -> String {
    results
        .iter()
        .map(|result| {
            let mut line = format!("{:?} {} -> {}", result.kind, result.value, result.target_id);
            if result.critical {
                line.push_str(" (crit)");
            }
            if result.defeated {
                line.push_str(" (defeated)");
            }
            if result.phase_transition {
                line.push_str(" (next phase)");
            }
            line
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn enemy_turn(outcome: &EnemyTurnOutcome) -> String {
    if let Some(reason) = outcome.skipped {
        return format!("{} skips: {reason:?}", outcome.attacker);
    }
    let attack = outcome.attack.as_deref().unwrap_or("attack");
    let target = outcome
        .target
        .map(|id| id.to_string())
        .unwrap_or_else(|| "nobody".to_string());
    if outcome.evaded {
        return format!("{} {attack} -> {target}: evaded", outcome.attacker);
    }
    let mut line = format!(
        "{} {attack} -> {target}: {} damage",
        outcome.attacker, outcome.damage
    );
    if outcome.target_defeated {
        line.push_str(" (down)");
    }
    if let Some(status) = outcome.status_applied {
        line.push_str(&format!(", {status}"));
    }
    if outcome.lifesteal > 0 {
        line.push_str(&format!(", drains {}", outcome.lifesteal));
    }
    line
}

mod common;

use combat_core::{
    CombatError, CombatEvent, CombatParticipant, CombatPhase, CompositionEntry, EffectKind,
    ErrorKind, Outcome, ParticipantId, Rewards, TargetMode,
};
use combat_runtime::{CardSelection, CombatSession, RuntimeError, Topic};
use std::sync::Arc;

use common::{catalog, config, rats, session};

fn combat_error(err: RuntimeError) -> CombatError {
    match err {
        RuntimeError::Combat(err) => err,
        other => panic!("expected a combat error, got {other:?}"),
    }
}

#[test]
fn start_builds_enemies_and_opens_first_turn() {
    let (mut session, log) = session(&["knight", "cleric"], config());
    let composition = vec![
        CompositionEntry::new("rat"),
        CompositionEntry::new("dragon"),
        CompositionEntry::new("rat").at("left"),
    ];

    let start = session.start_combat(&composition, false).unwrap();
    assert_eq!(start.phase, CombatPhase::HeroPhase);
    assert_eq!(start.skipped_templates, vec!["dragon".to_string()]);
    let ids: Vec<_> = start.enemies.iter().map(|enemy| enemy.id).collect();
    assert_eq!(ids, vec![ParticipantId::enemy(0), ParticipantId::enemy(1)]);
    assert_eq!(start.enemies[1].placement.as_deref(), Some("left"));

    assert_eq!(log.names(), vec!["combat_started", "turn_started"]);
    assert_eq!(session.turn_state().round, 1);
    assert_eq!(session.turn_state().active, Some(ParticipantId::hero(0)));
    assert_eq!(session.combats_started(), 1);
}

#[test]
fn start_without_resolved_enemies_keeps_no_state() {
    let (mut session, log) = session(&["knight"], config());

    let err = session
        .start_combat(&[CompositionEntry::new("dragon")], false)
        .unwrap_err();
    assert_eq!(err.failure().unwrap().error_kind, ErrorKind::MissingData);
    assert_eq!(combat_error(err), CombatError::NoEnemiesResolved);
    assert_eq!(session.turn_state().phase, CombatPhase::Init);
    assert!(session.roster().enemies.is_empty());
    assert!(log.is_empty());
}

#[test]
fn second_start_requires_force() {
    let (mut session, log) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();
    let published = log.len();

    let err = session.start_combat(&rats(3), false).unwrap_err();
    assert_eq!(combat_error(err), CombatError::CombatAlreadyActive);
    assert_eq!(session.roster().enemies.len(), 2);
    assert_eq!(log.len(), published);

    session.start_combat(&rats(3), true).unwrap();
    assert_eq!(session.roster().enemies.len(), 3);
    assert_eq!(session.combats_started(), 2);
    assert_eq!(session.turn_state().round, 1);
}

#[test]
fn cancel_after_select_changes_nothing() {
    let (mut session, log) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();
    let before = session.snapshot();

    let selection = session.select_card("strike").unwrap();
    assert_eq!(
        selection,
        CardSelection::AwaitingTarget {
            card: "strike".to_string(),
            target_mode: TargetMode::Enemy,
            legal_targets: vec![ParticipantId::enemy(0), ParticipantId::enemy(1)],
        }
    );
    assert_eq!(session.snapshot().pending_card.as_deref(), Some("strike"));
    assert_eq!(log.names().last(), Some(&"mode_target_selection"));

    session.cancel_selection().unwrap();
    assert_eq!(log.names().last(), Some(&"selection_cancelled"));
    assert_eq!(session.snapshot(), before);

    let err = session.cancel_selection().unwrap_err();
    assert_eq!(combat_error(err), CombatError::NoPendingSelection);
}

#[test]
fn illegal_target_keeps_selection_pending() {
    let (mut session, log) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();
    session.select_card("strike").unwrap();

    let err = session.select_target(ParticipantId::hero(1)).unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(
        combat_error(err),
        CombatError::IllegalTarget { .. }
    ));
    assert!(session.pending_selection().is_some());

    let play = session.select_target(ParticipantId::enemy(1)).unwrap();
    assert_eq!(play.results.len(), 1);
    assert_eq!(play.results[0].kind, EffectKind::Damage);
    assert_eq!(play.results[0].value, 4);
    assert!(play.results[0].defeated);
    assert_eq!(play.outcome, None);

    let knight = session.roster().hero(ParticipantId::hero(0)).unwrap();
    assert_eq!(knight.action_points(), 2);
    assert!(session.pending_selection().is_none());
    assert_eq!(log.names().last(), Some(&"card_used"));
    assert!(session.is_active());
}

#[test]
fn select_target_without_selection_is_rejected() {
    let (mut session, _) = session(&["knight"], config());
    session.start_combat(&rats(1), false).unwrap();

    let err = session.select_target(ParticipantId::enemy(0)).unwrap_err();
    assert_eq!(combat_error(err), CombatError::NoPendingSelection);
}

#[test]
fn unaffordable_and_unknown_cards_are_rejected() {
    let (mut session, _) = session(&["knight", "cleric"], config());
    session
        .start_combat(&[CompositionEntry::new("ogre")], false)
        .unwrap();

    assert!(matches!(
        session.select_card("mend").map_err(combat_error),
        Err(CombatError::CardNotInHand { .. })
    ));

    session.select_card("guard").unwrap();
    session.select_card("sweep").unwrap();
    assert_eq!(
        session.select_card("sweep").map_err(combat_error),
        Err(CombatError::InsufficientActionPoints {
            required: 2,
            available: 0
        })
    );
}

#[test]
fn area_card_can_win_on_the_spot() {
    let (mut session, log) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();

    let CardSelection::Resolved(play) = session.select_card("sweep").unwrap() else {
        panic!("area cards resolve on selection");
    };
    assert_eq!(play.results.len(), 2);
    assert!(play.results.iter().all(|result| result.defeated));
    assert_eq!(play.outcome, Some(Outcome::Victory));

    assert_eq!(session.outcome(), Some(Outcome::Victory));
    assert_eq!(session.rewards(), Rewards { xp: 10, gold: 4 });
    let events = log.take();
    assert_eq!(events[events.len() - 2].name(), "area_card_used");
    assert_eq!(
        events.last(),
        Some(&CombatEvent::CombatEnded {
            outcome: Outcome::Victory,
            rounds: 1,
            rewards_summary: Some(Rewards { xp: 10, gold: 4 }),
        })
    );

    let err = session.end_turn().unwrap_err();
    assert_eq!(combat_error(err), CombatError::NoActiveParticipant);
}

#[test]
fn self_card_resolves_on_the_caster() {
    let (mut session, _) = session(&["knight"], config());
    session.start_combat(&rats(1), false).unwrap();

    let CardSelection::Resolved(play) = session.select_card("guard").unwrap() else {
        panic!("self cards resolve on selection");
    };
    assert_eq!(play.targets, vec![ParticipantId::hero(0)]);
    assert_eq!(session.snapshot().heroes[0].shield, 5);
}

#[test]
fn ending_the_last_turn_runs_the_enemy_phase() {
    let (mut session, log) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();
    session.select_card("guard").unwrap();

    assert_eq!(session.end_turn().unwrap(), CombatPhase::HeroPhase);
    assert_eq!(session.turn_state().active, Some(ParticipantId::hero(1)));
    log.take();

    assert_eq!(session.end_turn().unwrap(), CombatPhase::HeroPhase);
    assert_eq!(
        log.names(),
        vec![
            "enemy_phase_started",
            "enemy_turn_result",
            "enemy_turn_result",
            "round_started",
            "turn_started",
        ]
    );
    assert_eq!(session.turn_state().round, 2);
    assert_eq!(session.turn_state().active, Some(ParticipantId::hero(0)));
    let knight = session.roster().hero(ParticipantId::hero(0)).unwrap();
    assert_eq!(knight.action_points(), knight.action_points_max());
}

#[test]
fn manual_enemy_phase_when_auto_is_off() {
    let (mut session, _) = session(&["knight", "cleric"], config().with_auto_enemy_phase(false));
    session.start_combat(&rats(2), false).unwrap();

    session.end_turn().unwrap();
    assert_eq!(session.end_turn().unwrap(), CombatPhase::EnemyPhase);
    assert_eq!(session.turn_state().active, None);
    assert_eq!(
        session.select_card("strike").map_err(combat_error),
        Err(CombatError::NoActiveParticipant)
    );

    let outcomes = session.process_enemy_phase().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|outcome| outcome.target.is_some()));
    assert_eq!(session.turn_state().phase, CombatPhase::HeroPhase);
    assert_eq!(session.turn_state().round, 2);

    assert_eq!(
        session.process_enemy_phase().map_err(combat_error),
        Err(CombatError::NotEnemyPhase)
    );
}

#[test]
fn defeat_ends_combat_and_blocks_the_next_start() {
    let (mut session, log) = session(&["squire"], config());
    session.start_combat(&[CompositionEntry::new("ogre")], false).unwrap();

    assert_eq!(session.end_turn().unwrap(), CombatPhase::CombatOver(Outcome::Defeat));
    assert_eq!(session.outcome(), Some(Outcome::Defeat));
    assert_eq!(
        log.take().last(),
        Some(&CombatEvent::CombatEnded {
            outcome: Outcome::Defeat,
            rounds: 1,
            rewards_summary: None,
        })
    );

    let err = session.start_combat(&rats(1), false).unwrap_err();
    assert_eq!(combat_error(err), CombatError::NoHeroesAvailable);
}

#[test]
fn hp_persists_across_combats() {
    let (mut session, _) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();
    session.select_card("guard").unwrap();
    session.end_turn().unwrap();
    session.end_turn().unwrap();

    let wounded: Vec<u32> = session.roster().heroes.iter().map(|hero| hero.hp()).collect();
    assert!(wounded.iter().sum::<u32>() < 50);

    session.start_combat(&rats(1), true).unwrap();
    let heroes = &session.roster().heroes;
    assert_eq!(heroes.iter().map(|hero| hero.hp()).collect::<Vec<_>>(), wounded);
    assert_eq!(heroes[0].shield(), 0);
    assert_eq!(heroes[0].action_points(), heroes[0].action_points_max());
}

#[test]
fn possible_targets_follow_the_card_mode() {
    let (mut session, _) = session(&["cleric", "knight"], config());
    session.start_combat(&rats(2), false).unwrap();

    assert_eq!(
        session.possible_targets("mend").unwrap(),
        vec![ParticipantId::hero(0), ParticipantId::hero(1)]
    );
    assert!(matches!(
        session.possible_targets("strike").map_err(combat_error),
        Err(CombatError::CardNotInHand { .. })
    ));
}

#[test]
fn reset_discards_the_combat_but_keeps_the_party() {
    let (mut session, _) = session(&["knight", "cleric"], config());
    session.start_combat(&rats(2), false).unwrap();
    session.select_card("strike").unwrap();

    session.reset();
    assert_eq!(session.turn_state().phase, CombatPhase::Init);
    assert!(session.pending_selection().is_none());
    assert!(session.roster().enemies.is_empty());
    assert_eq!(session.roster().heroes.len(), 2);

    session.start_combat(&rats(1), false).unwrap();
}

#[test]
fn snapshot_serializes_for_presentation() {
    let (mut session, _) = session(&["knight"], config());
    session.start_combat(&rats(1), false).unwrap();
    session.select_card("strike").unwrap();

    let value = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(value["round"], 1);
    assert_eq!(value["pending_card"], "strike");
    assert_eq!(value["heroes"][0]["name"], "Knight");
    assert_eq!(value["legal_targets"][0], ParticipantId::enemy(0).0);
}

#[tokio::test]
async fn channel_subscribers_see_only_their_topics() {
    let (mut session, _) = session(&["knight"], config());
    let (id, mut rx) = session.event_bus().subscribe_channel(&[Topic::Combat]);

    session.start_combat(&rats(1), false).unwrap();
    let event = rx.recv().await.unwrap();
    assert_eq!(event.name(), "combat_started");
    assert!(rx.try_recv().is_err());

    assert!(session.unsubscribe(id));
    session.start_combat(&rats(1), true).unwrap();
    assert!(rx.recv().await.is_none());
}

#[test]
fn sessions_can_share_one_oracle() {
    let oracle: Arc<dyn combat_core::TemplateOracle> = Arc::new(catalog());
    let build = |party: &[&str]| {
        CombatSession::builder()
            .config(config())
            .shared_oracle(Arc::clone(&oracle))
            .party(party.iter().copied())
            .build()
            .unwrap()
    };

    let mut first = build(&["knight"]);
    let mut second = build(&["cleric", "knight"]);
    assert_eq!(Arc::strong_count(&oracle), 3);

    first.start_combat(&rats(1), false).unwrap();
    second.start_combat(&rats(2), false).unwrap();
    assert_eq!(first.roster().heroes.len(), 1);
    assert_eq!(second.roster().heroes.len(), 2);
    assert_eq!(second.roster().enemies.len(), 2);
}

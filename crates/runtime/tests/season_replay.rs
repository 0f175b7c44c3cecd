use ballpark_content::demo_league;
use ballpark_core::{
    Action, ActionResult, LeaguePhase, LeagueState, SimConfig, TeamId, check_invariants,
};
use runtime::{
    AutoManager, Event, FileJournal, FileStateRepository, LeagueEvent, Runtime, RuntimeConfig,
    Session, StateRepository, Topic,
};

fn config(save_dir: Option<std::path::PathBuf>) -> RuntimeConfig {
    RuntimeConfig {
        sim: SimConfig {
            games_per_matchup: 1,
            check_invariants: true,
            ..SimConfig::default()
        },
        seed: 12345,
        save_dir,
        session_id: "season-test".into(),
        autosave: true,
        ..RuntimeConfig::default()
    }
}

#[tokio::test]
async fn season_runs_through_the_worker_and_replays_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = Runtime::builder()
        .config(config(Some(dir.path().to_path_buf())))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let created = handle
        .submit(Action::new_league(demo_league(4, 12345)))
        .await
        .unwrap();
    assert!(created.applied());

    let season = handle
        .submit(Action::SimSeason(ballpark_core::action::SimSeasonAction))
        .await
        .unwrap();
    let Some(ActionResult::Season(report)) = season.results.first() else {
        panic!("expected a season report, got {:?}", season.diagnostics);
    };
    assert!(report.complete);
    assert_eq!(report.games_played, 6);

    let state = handle.query_state().await.unwrap();
    assert_eq!(check_invariants(&state), Ok(()));
    let final_root = season.state_root().expect("root").to_owned();
    assert_eq!(final_root, hex::encode(state.state_root().unwrap()));

    drop(handle);
    runtime.shutdown().await.unwrap();

    let session_dir = dir.path().join("season-test");
    let saved = FileStateRepository::new(&session_dir).unwrap();
    let (clock, latest) = saved.load_latest().unwrap().expect("autosaved");
    assert_eq!(clock, state.clock);
    assert_eq!(latest, state);

    let entries = FileJournal::read(session_dir.join("season-test.journal.jsonl")).unwrap();
    assert_eq!(entries.len(), 2);
    let replayed = Session::verify_replay(LeagueState::with_seed(12345), config(None).sim, &entries)
        .expect("journal replays to the same roots");
    assert_eq!(replayed.state_root_hex().unwrap(), final_root);
}

#[tokio::test]
async fn auto_manager_plays_an_exhibition_pitch_by_pitch() {
    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            event_buffer_size: 4_096,
            ..config(None)
        })
        .provider(AutoManager::new(99))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut league_rx = runtime.subscribe(Topic::League);

    handle
        .submit(Action::new_league(demo_league(2, 5)))
        .await
        .unwrap();
    let start = handle
        .submit(Action::exhibition(TeamId(1), TeamId(2)))
        .await
        .unwrap();
    let Some(ActionResult::GameStarted(game_id)) = start.results.first().cloned() else {
        panic!("game did not start: {:?}", start.diagnostics);
    };

    let steps = runtime.run_until_idle(5_000).await.unwrap();
    assert!(steps > 50, "a full game takes more than {steps} pitches");

    let state = handle.query_state().await.unwrap();
    let game = state.games.get(&game_id).expect("game");
    assert!(game.is_final());
    assert!(state.box_scores.contains_key(&game_id));
    assert_eq!(state.phase, LeaguePhase::RegularSeason);
    assert_eq!(state.pointers.game_id, None);

    let mut applied = 0;
    while let Ok(event) = league_rx.try_recv() {
        if let Event::League(LeagueEvent::ActionApplied { .. }) = event {
            applied += 1;
        }
    }
    assert!(applied > 0);

    let journal = handle.journal().await.unwrap();
    assert!(journal.iter().any(|entry| entry.follow_up));
    assert!(journal.iter().all(|entry| entry.applied));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_submission_is_reported_not_raised() {
    let runtime = Runtime::builder().config(config(None)).build().await.unwrap();
    let handle = runtime.handle();
    let mut diagnostics = runtime.subscribe(Topic::Diagnostics);

    let report = handle
        .submit(Action::exhibition(TeamId(1), TeamId(2)))
        .await
        .unwrap();
    assert!(!report.applied());
    assert_eq!(report.diagnostics.len(), 1);

    match diagnostics.recv().await.unwrap() {
        Event::Diagnostic(runtime::DiagnosticEvent::Reported { diagnostic, .. }) => {
            assert_eq!(diagnostic.code, "PLAY_INVALID_PHASE");
        }
        other => panic!("unexpected event {other:?}"),
    }

    assert!(matches!(
        handle.save().await,
        Err(runtime::RuntimeError::PersistenceDisabled)
    ));
    drop(handle);
    runtime.shutdown().await.unwrap();
}

use super::*;
use crate::action::{ActionKind, LeagueSeed};
use crate::error::DiagnosticKind;
use crate::progression::{GameRun, HalfInningAdvance};
use crate::state::{
    BatterRatings, Count, EventKind, GameStatus, Intent, LeaguePhase, Location, PitchCall,
    PitchType, PitcherRatings, Player, PlayerId, RunnerState, Side, Team, TeamId, Tick,
};

fn league_seed(teams: u32, seed: u32) -> LeagueSeed {
    let mut clubs = Vec::new();
    let mut players = Vec::new();
    for t in 1..=teams {
        let team_id = TeamId(t);
        let mut team = Team::new(team_id, format!("Club {t}"), format!("C{t}"));
        for slot in 0..11 {
            let id = PlayerId(t * 100 + slot);
            let player = if slot < 9 {
                let skill = 40 + ((t * 7 + slot * 3) % 25) as u8;
                Player::batter(
                    id,
                    format!("Hitter {id}"),
                    BatterRatings {
                        contact: skill,
                        power: skill,
                        discipline: 50,
                        speed: 50,
                    },
                )
            } else {
                team.rotation.push(id);
                Player::pitcher(id, format!("Arm {id}"), PitcherRatings::default())
            };
            if slot < 9 {
                team.lineup.push(id);
            }
            team.roster.push(id);
            players.push(player);
        }
        clubs.push(team);
    }
    LeagueSeed {
        seed,
        year: 2030,
        teams: clubs,
        players,
    }
}

fn league(teams: u32, seed: u32, config: &SimConfig) -> LeagueState {
    let step = dispatch(
        &LeagueState::default(),
        &Action::new_league(league_seed(teams, seed)),
        config,
    );
    assert!(step.applied(), "league seed rejected: {:?}", step.diagnostic);
    step.state
}

fn exhibition(config: &SimConfig) -> LeagueState {
    let state = league(2, 12345, config);
    let step = dispatch(&state, &Action::exhibition(TeamId(1), TeamId(2)), config);
    assert!(step.applied(), "{:?}", step.diagnostic);
    step.state
}

const FASTBALL: PitchCall = PitchCall::new(PitchType::FF, Location::Middle, Intent::Attack);

#[test]
fn same_seed_same_pitch_outcome() {
    let config = SimConfig::default();
    let mut state = exhibition(&config);
    let at_bat_id = state.pointers.at_bat_id.expect("leadoff at-bat");
    if let Some(at_bat) = state.at_bats.get_mut(&at_bat_id) {
        at_bat.count = Count::new(2, 2);
    }

    let first = dispatch(&state, &Action::call_pitch(FASTBALL), &config);
    let second = dispatch(&state, &Action::call_pitch(FASTBALL), &config);
    assert_eq!(first, second);
    assert!(first.applied());
    assert_eq!(first.state.rng.seed, second.state.rng.seed);
}

#[test]
fn replayed_games_are_identical() {
    let config = SimConfig::default().with_check_invariants(true);
    let play = || {
        let state = exhibition(&config);
        dispatch(&state, &Action::SimGame(crate::action::SimGameAction), &config).state
    };
    let (a, b) = (play(), play());
    assert_eq!(a, b);
    #[cfg(feature = "serde")]
    {
        let root = |state: &LeagueState| state.state_root().expect("encodable");
        assert_eq!(hex::encode(root(&a)), hex::encode(root(&b)));
        assert_ne!(root(&a), root(&exhibition(&config)));
        assert_ne!(root(&LeagueState::default()), [0; 32]);
    }
}

#[test]
fn rejected_action_leaves_state_untouched() {
    let config = SimConfig::default();
    let state = league(2, 5, &config);
    let step = dispatch(&state, &Action::call_pitch(FASTBALL), &config);

    assert!(!step.applied());
    assert_eq!(step.state, state);
    assert_eq!(step.state.clock, state.clock);
    let diagnostic = step.diagnostic.expect("diagnostic");
    assert_eq!(diagnostic.kind, DiagnosticKind::InvalidState);
    assert_eq!(diagnostic.code, "PLAY_NO_ACTIVE_AT_BAT");
}

#[test]
fn unknown_team_is_a_missing_reference() {
    let config = SimConfig::default();
    let state = league(2, 5, &config);
    let step = dispatch(&state, &Action::exhibition(TeamId(1), TeamId(77)), &config);
    assert_eq!(
        step.diagnostic.map(|d| d.kind),
        Some(DiagnosticKind::MissingReference)
    );
    assert_eq!(step.state, state);
}

#[test]
fn successful_dispatch_ticks_the_clock() {
    let config = SimConfig::default();
    let state = exhibition(&config);
    assert_eq!(state.clock, Tick(2));
    let step = dispatch(&state, &Action::call_pitch(FASTBALL), &config);
    assert_eq!(step.state.clock, Tick(3));
    let outcome = step.outcome.expect("applied");
    assert_eq!(outcome.delta.clock, Tick(3));
    assert!(outcome.delta.fields.contains(crate::state::LeagueFields::PITCHES));
    assert_eq!(outcome.delta.added.pitches, 1);
}

#[test]
fn simulation_is_blocked_outside_the_season_phases() {
    let config = SimConfig::default();
    let mut state = league(2, 9, &config);
    for _ in 0..2 {
        state = dispatch(
            &state,
            &Action::AdvancePhase(crate::action::AdvancePhaseAction),
            &config,
        )
        .state;
    }
    assert_eq!(state.phase, LeaguePhase::Offseason);

    let step = dispatch(&state, &Action::exhibition(TeamId(1), TeamId(2)), &config);
    assert_eq!(
        step.diagnostic.map(|d| d.kind),
        Some(DiagnosticKind::InvalidPhase)
    );
}

#[test]
fn pitch_on_resolved_at_bat_is_a_silent_no_op() {
    let config = SimConfig::default();
    let mut state = exhibition(&config);
    for _ in 0..200 {
        let step = dispatch(&state, &Action::call_pitch(FASTBALL), &config);
        state = step.state;
        if state.current_at_bat().is_some_and(|ab| ab.is_resolved()) {
            break;
        }
    }
    assert!(state.current_at_bat().is_some_and(|ab| ab.is_resolved()));

    let step = dispatch(&state, &Action::call_pitch(FASTBALL), &config);
    assert!(!step.applied());
    assert!(step.diagnostic.is_none());
    assert_eq!(step.state, state);
}

#[test]
fn third_out_flips_sides_and_resets_the_half() {
    let config = SimConfig::default().with_check_invariants(true);
    let mut state = exhibition(&config);
    let mut halves = vec![(1, Side::Top)];

    for _ in 0..5_000 {
        state = run_to_quiescence(&state, Action::call_pitch(FASTBALL), &config).state;
        let half = state.current_half_inning().expect("game continues");
        let key = (half.inning_number, half.side);
        if halves.last() != Some(&key) {
            assert_eq!(half.outs, 0);
            assert_eq!(half.runner_state, RunnerState::Empty);
            assert_eq!(half.runs, 0);
            halves.push(key);
        }
        if halves.len() == 3 {
            break;
        }
    }
    assert_eq!(halves, vec![(1, Side::Top), (1, Side::Bottom), (2, Side::Top)]);
}

#[test]
fn sim_half_inning_reports_the_next_half() {
    let config = SimConfig::default();
    let state = exhibition(&config);
    let step = dispatch(
        &state,
        &Action::SimHalfInning(crate::action::SimHalfInningAction),
        &config,
    );
    let Some(ActionResult::HalfInning(HalfInningAdvance::Started(next))) = step.result().cloned()
    else {
        panic!("expected a new half-inning, got {:?}", step.result());
    };
    let half = step.state.half_innings.get(&next).expect("half");
    assert_eq!((half.inning_number, half.side), (1, Side::Bottom));
    assert!(step.state.at_bats.len() >= 3);
}

#[test]
fn simulated_game_ends_final() {
    let config = SimConfig::default().with_check_invariants(true);
    let state = exhibition(&config);
    let game_id = state.pointers.game_id.expect("active game");
    let step = dispatch(&state, &Action::SimGame(crate::action::SimGameAction), &config);

    let Some(ActionResult::Game(run)) = step.result().cloned() else {
        panic!("expected a game run");
    };
    assert!(run.completed);
    assert!(step.diagnostic.is_none());

    let state = step.state;
    let game = state.games.get(&game_id).expect("game");
    assert_eq!(game.status, GameStatus::Final);
    assert_ne!(game.score.home, game.score.away);
    assert!(game.half_inning_ids.len() >= 17);
    assert_eq!(state.pointers.game_id, None);
    assert_eq!(state.pointers.at_bat_id, None);

    let box_score = state.box_scores.get(&game_id).expect("box score");
    assert_eq!(box_score.home.totals.runs, u32::from(game.score.home));
    assert_eq!(box_score.away.totals.runs, u32::from(game.score.away));
    assert!(box_score.summary.starts_with("Final: "));
    assert!(state.log.iter().any(|e| e.kind == EventKind::GameFinal));
}

#[test]
fn one_batter_lineup_never_reaches_the_field() {
    let config = SimConfig::default().with_check_invariants(true);
    let mut seed = league_seed(2, 12345);
    seed.teams[0].lineup.truncate(1);
    let step = dispatch(&LeagueState::default(), &Action::new_league(seed), &config);

    assert!(!step.applied());
    let diagnostic = step.diagnostic.expect("rejected");
    assert_eq!(diagnostic.code, "LEAGUE_SHORT_LINEUP");
    assert!(step.state.teams.is_empty());
}

#[test]
fn half_inning_cap_reports_a_runaway() {
    let config = SimConfig::default().with_max_half_innings(3);
    let state = exhibition(&config);
    let step = dispatch(&state, &Action::SimGame(crate::action::SimGameAction), &config);

    assert!(step.applied());
    assert_eq!(
        step.result(),
        Some(&ActionResult::Game(GameRun {
            game_id: state.pointers.game_id.expect("game"),
            half_innings: 3,
            completed: false,
        }))
    );
    let diagnostic = step.diagnostic.expect("runaway diagnostic");
    assert_eq!(diagnostic.kind, DiagnosticKind::RunawayLoop);
    assert!(step.state.pointers.game_id.is_some());
}

#[test]
fn follow_up_queue_is_bounded() {
    let config = SimConfig {
        max_follow_ups: 0,
        ..SimConfig::default()
    };
    let mut state = exhibition(&config);
    let mut limited = None;
    for _ in 0..200 {
        let settled = run_to_quiescence(&state, Action::call_pitch(FASTBALL), &config);
        state = settled.state;
        if let Some(diagnostic) = settled.diagnostics.first() {
            limited = Some(diagnostic.clone());
            break;
        }
    }
    let diagnostic = limited.expect("an at-bat ended");
    assert_eq!(diagnostic.code, "ENGINE_FOLLOW_UP_LIMIT");
    assert!(state.current_at_bat().is_some_and(|ab| ab.is_resolved()));
}

#[test]
fn follow_up_queue_drops_the_follow_up_past_its_limit() {
    let config = SimConfig::default();
    let mut state = exhibition(&config);
    let ending = loop {
        let step = dispatch(&state, &Action::call_pitch(FASTBALL), &config);
        if step.follow_up().is_some() {
            break step;
        }
        state = step.state;
    };

    let mut open = FollowUpQueue::new(Action::call_pitch(FASTBALL), 1);
    assert_eq!(open.pop().map(|(_, follow_up)| follow_up), Some(false));
    open.settle(&ending).expect("within limit");
    let (next, follow_up) = open.pop().expect("queued follow-up");
    assert!(follow_up);
    assert_eq!(next.kind(), ActionKind::AdvanceAtBat);

    let mut closed = FollowUpQueue::new(Action::call_pitch(FASTBALL), 0);
    closed.pop();
    let err = closed.settle(&ending).expect_err("limit reached");
    assert_eq!(
        err,
        ExecuteError::FollowUpLimit {
            origin: ActionKind::CallPitch,
            limit: 0
        }
    );
    assert!(closed.pop().is_none());
}

#[test]
fn reducer_brings_up_the_next_batter() {
    let config = SimConfig::default();
    let mut state = exhibition(&config);
    let leadoff = state.pointers.at_bat_id;
    for _ in 0..200 {
        state = reducer(&state, &Action::call_pitch(FASTBALL));
        if state.pointers.at_bat_id != leadoff {
            break;
        }
    }
    let next = state.current_at_bat().expect("second batter up");
    assert_ne!(Some(next.id), leadoff);
    assert!(!next.is_resolved());
    assert_eq!(next.batter_id, PlayerId(201));
}

#[test]
fn season_runs_to_completion() {
    let config = SimConfig {
        games_per_matchup: 1,
        check_invariants: true,
        ..SimConfig::default()
    };
    let state = league(4, 77, &config);
    let step = dispatch(&state, &Action::SimSeason(crate::action::SimSeasonAction), &config);

    let Some(ActionResult::Season(report)) = step.result().cloned() else {
        panic!("expected a season report: {:?}", step.diagnostic);
    };
    assert!(report.complete);
    assert_eq!(report.games_played, 6);
    assert_eq!(report.days, 3);

    let season = step.state.current_season().expect("season");
    assert!(season.is_complete());
    let wins: u32 = season.standings.values().map(|row| row.wins).sum();
    let losses: u32 = season.standings.values().map(|row| row.losses).sum();
    assert_eq!((wins, losses), (6, 6));
    assert!(
        step.state
            .log
            .iter()
            .any(|e| e.kind == EventKind::SeasonComplete)
    );

    let again = dispatch(
        &step.state,
        &Action::SimSeason(crate::action::SimSeasonAction),
        &config,
    );
    assert!(!again.applied());
}

#[test]
fn scheduled_game_played_by_hand_advances_the_cursor() {
    let config = SimConfig {
        games_per_matchup: 1,
        ..SimConfig::default()
    };
    let state = league(2, 31, &config);
    let started = dispatch(&state, &Action::next_scheduled_game(), &config);
    assert!(started.applied(), "{:?}", started.diagnostic);

    let finished = dispatch(
        &started.state,
        &Action::SimGame(crate::action::SimGameAction),
        &config,
    );
    let season = finished.state.current_season().expect("season");
    assert_eq!(season.current_game_index, 1);
    assert!(season.is_complete());
}

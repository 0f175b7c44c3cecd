//! Runner advancement engine.
//!
//! Pure functions from an occupancy state plus a hit or walk to the next
//! occupancy state and the runs that scored. Special plays (double play,
//! sacrifice fly) never come through here; they carry their own
//! `runner_state_after`.

use crate::state::{AtBatPlay, AtBatResult, PlayerId, RunnerState};

/// How the batter reached base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Hit worth `1..=4` bases. Values outside the range are clamped.
    Hit(u8),
    /// Base on balls: force-only movement.
    Walk,
}

/// Occupancy and runs after an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advanced {
    pub runners: RunnerState,
    pub runs: u8,
}

pub fn advance(runners: RunnerState, how: Advance, batter: PlayerId) -> Advanced {
    match how {
        Advance::Hit(bases) => advance_on_hit(runners, bases.clamp(1, 4), batter),
        Advance::Walk => advance_on_walk(runners, batter),
    }
}

/// Every runner moves up `bases`; runners pushed past third score.
fn advance_on_hit(runners: RunnerState, bases: u8, batter: PlayerId) -> Advanced {
    let slots = runners.slots();
    let mut next = [None; 3];
    let mut runs = 0;

    for index in (0..3).rev() {
        if let Some(runner) = slots[index] {
            let target = index + usize::from(bases);
            if target >= 3 {
                runs += 1;
            } else {
                next[target] = Some(runner);
            }
        }
    }

    if bases >= 4 {
        runs += 1;
    } else {
        next[usize::from(bases) - 1] = Some(batter);
    }

    Advanced {
        runners: RunnerState::from_slots(next),
        runs,
    }
}

/// Walk table. Runners move only when forced.
///
/// A loaded walk yields `FirstSecond` plus one run: the runner from second
/// is dropped from the bases rather than held at third.
fn advance_on_walk(runners: RunnerState, batter: PlayerId) -> Advanced {
    use RunnerState::*;

    let (runners, runs) = match runners {
        Empty => (First { first: batter }, 0),
        First { first } => (
            FirstSecond {
                first: batter,
                second: first,
            },
            0,
        ),
        Second { second } => (
            FirstSecond {
                first: batter,
                second,
            },
            0,
        ),
        Third { third } => (
            FirstThird {
                first: batter,
                third,
            },
            0,
        ),
        FirstSecond { first, second } => (
            Loaded {
                first: batter,
                second: first,
                third: second,
            },
            0,
        ),
        FirstThird { first, third } => (
            Loaded {
                first: batter,
                second: first,
                third,
            },
            0,
        ),
        SecondThird { second, third } => (
            Loaded {
                first: batter,
                second,
                third,
            },
            0,
        ),
        Loaded { first, .. } => (
            FirstSecond {
                first: batter,
                second: first,
            },
            1,
        ),
    };
    Advanced { runners, runs }
}

/// Effect of one resolved at-bat on its half-inning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub runners: RunnerState,
    pub runs: u8,
    pub outs: u8,
}

/// Applies a resolved at-bat to the occupancy it started from.
///
/// Plays that carry `runner_state_after` bypass the advancement engine and
/// are taken as-is. Outs leave the runners where they were.
pub fn settle(
    runners: RunnerState,
    batter: PlayerId,
    result: AtBatResult,
    play: Option<&AtBatPlay>,
) -> Settlement {
    if let Some(play) = play.filter(|play| play.overrides_advancement()) {
        return Settlement {
            runners: play.runner_state_after.unwrap_or(runners),
            runs: play.runs_scored,
            outs: play.outs_added,
        };
    }

    let advanced = match result {
        AtBatResult::Walk => Some(advance(runners, Advance::Walk, batter)),
        other => other
            .hit_bases()
            .map(|bases| advance(runners, Advance::Hit(bases), batter)),
    };

    match advanced {
        Some(Advanced { runners, runs }) => Settlement {
            runners,
            runs,
            outs: 0,
        },
        None => Settlement {
            runners,
            runs: 0,
            outs: play.map_or(1, |play| play.outs_added),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BATTER: PlayerId = PlayerId(99);

    fn loaded() -> RunnerState {
        RunnerState::Loaded {
            first: PlayerId(1),
            second: PlayerId(2),
            third: PlayerId(3),
        }
    }

    #[test]
    fn walk_with_bases_loaded_forces_in_a_run() {
        let after = advance(loaded(), Advance::Walk, BATTER);
        assert_eq!(after.runs, 1);
        assert_eq!(after.runners.tag(), "first_second");
        assert_eq!(
            after.runners,
            RunnerState::FirstSecond {
                first: BATTER,
                second: PlayerId(1),
            }
        );
    }

    #[test]
    fn loaded_walk_leaves_two_runners_and_one_run() {
        let after = advance(loaded(), Advance::Walk, BATTER);
        assert_eq!(after.runners.runner_count(), 2);
        assert_eq!(after.runs, 1);
        assert!(after.runners.runners().all(|id| id != PlayerId(2)));
    }

    #[test]
    fn walk_does_not_move_unforced_runner() {
        let after = advance(RunnerState::Second { second: PlayerId(2) }, Advance::Walk, BATTER);
        assert_eq!(
            after.runners,
            RunnerState::FirstSecond {
                first: BATTER,
                second: PlayerId(2),
            }
        );
        let after = advance(
            RunnerState::SecondThird {
                second: PlayerId(2),
                third: PlayerId(3),
            },
            Advance::Walk,
            BATTER,
        );
        assert_eq!(after.runs, 0);
        assert_eq!(after.runners.tag(), "loaded");
    }

    #[test]
    fn double_clears_second_and_third() {
        let after = advance(
            RunnerState::FirstThird {
                first: PlayerId(1),
                third: PlayerId(3),
            },
            Advance::Hit(2),
            BATTER,
        );
        assert_eq!(after.runs, 1);
        assert_eq!(
            after.runners,
            RunnerState::SecondThird {
                second: BATTER,
                third: PlayerId(1),
            }
        );
    }

    #[test]
    fn grand_slam_scores_four() {
        let after = advance(loaded(), Advance::Hit(4), BATTER);
        assert_eq!(after.runs, 4);
        assert!(after.runners.is_empty());
    }

    #[test]
    fn override_play_bypasses_engine() {
        let play = AtBatPlay {
            outs_added: 2,
            runs_scored: 0,
            runner_state_after: Some(RunnerState::Empty),
            batted_ball_type: None,
            contact: None,
            kind: crate::state::PlayKind::DoublePlay,
            note: None,
        };
        let settled = settle(
            RunnerState::First { first: PlayerId(1) },
            BATTER,
            AtBatResult::Out,
            Some(&play),
        );
        assert_eq!(settled.outs, 2);
        assert!(settled.runners.is_empty());
    }

    #[test]
    fn strikeout_keeps_runners() {
        let settled = settle(loaded(), BATTER, AtBatResult::Strikeout, None);
        assert_eq!(settled.outs, 1);
        assert_eq!(settled.runs, 0);
        assert_eq!(settled.runners, loaded());
    }

    fn runner_state() -> impl Strategy<Value = RunnerState> {
        prop::array::uniform3(any::<bool>()).prop_map(|occupied| {
            let mut slots = [None; 3];
            for (index, taken) in occupied.into_iter().enumerate() {
                if taken {
                    slots[index] = Some(PlayerId(index as u32 + 1));
                }
            }
            RunnerState::from_slots(slots)
        })
    }

    fn how() -> impl Strategy<Value = Advance> {
        prop_oneof![Just(Advance::Walk), (1u8..=4).prop_map(Advance::Hit)]
    }

    proptest! {
        #[test]
        fn runners_are_conserved(runners in runner_state(), how in how()) {
            prop_assume!(!(runners.runner_count() == 3 && how == Advance::Walk));
            let before = runners.runner_count();
            let after = advance(runners, how, BATTER);
            prop_assert_eq!(
                u32::from(after.runners.runner_count()) + u32::from(after.runs),
                u32::from(before) + 1
            );
            let slots = after.runners.slots();
            prop_assert_eq!(RunnerState::from_slots(slots), after.runners);
        }

        #[test]
        fn batter_is_placed_or_scores(runners in runner_state(), bases in 1u8..=4) {
            let after = advance(runners, Advance::Hit(bases), BATTER);
            let placed = after.runners.runners().any(|id| id == BATTER);
            prop_assert_eq!(placed, bases < 4);
        }
    }
}

//! Defensive resolution of a ball in play.
//!
//! Special plays are tried first (double play on grounders, sacrifice fly on
//! fly balls); everything else is sampled from the contact × batted-ball hit
//! table.

use crate::env::{ProbTable, RngState, weighted_roll};
use crate::state::{
    AtBatPlay, AtBatResult, Bases, BattedBallType, ContactQuality, PlayKind, RunnerState,
};

pub const DOUBLE_PLAY_WEAK: f64 = 0.28;
pub const DOUBLE_PLAY_HARD: f64 = 0.18;
pub const SACRIFICE_FLY: f64 = 0.45;

/// Outs and occupancy when the ball is put in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldingSituation {
    pub outs: u8,
    pub runners: RunnerState,
}

pub fn double_play_chance(contact: ContactQuality) -> f64 {
    match contact {
        ContactQuality::Weak => DOUBLE_PLAY_WEAK,
        ContactQuality::Solid | ContactQuality::Crushed => DOUBLE_PLAY_HARD,
    }
}

fn double_play_eligible(batted: BattedBallType, situation: FieldingSituation) -> bool {
    batted == BattedBallType::Ground
        && situation.outs <= 1
        && situation.runners.bases().contains(Bases::FIRST)
}

fn sacrifice_fly_eligible(
    batted: BattedBallType,
    contact: ContactQuality,
    situation: FieldingSituation,
) -> bool {
    batted == BattedBallType::Fly
        && situation.outs <= 1
        && situation.runners.bases().contains(Bases::THIRD)
        && contact != ContactQuality::Weak
}

/// Hit/out distribution for a batted-ball type and contact quality.
pub fn hit_table(batted: BattedBallType, contact: ContactQuality) -> ProbTable<AtBatResult> {
    use AtBatResult::{Double, HomeRun, Out, Single, Triple};
    use BattedBallType::{Fly, Ground, Line, Pop};
    use ContactQuality::{Crushed, Solid, Weak};

    // [out, single, double, triple, home_run]
    let row: [f64; 5] = match (batted, contact) {
        (Ground, Weak) => [0.88, 0.12, 0.0, 0.0, 0.0],
        (Ground, Solid) => [0.72, 0.25, 0.03, 0.0, 0.0],
        (Ground, Crushed) => [0.55, 0.36, 0.08, 0.01, 0.0],
        (Fly, Weak) => [0.95, 0.04, 0.01, 0.0, 0.0],
        (Fly, Solid) => [0.70, 0.06, 0.12, 0.02, 0.10],
        (Fly, Crushed) => [0.35, 0.05, 0.20, 0.04, 0.36],
        (Line, Weak) => [0.45, 0.50, 0.05, 0.0, 0.0],
        (Line, Solid) => [0.28, 0.52, 0.17, 0.02, 0.01],
        (Line, Crushed) => [0.20, 0.40, 0.27, 0.04, 0.09],
        (Pop, Weak) => [0.99, 0.01, 0.0, 0.0, 0.0],
        (Pop, Solid) => [0.97, 0.03, 0.0, 0.0, 0.0],
        (Pop, Crushed) => [0.93, 0.05, 0.02, 0.0, 0.0],
    };

    ProbTable::from_weights(&[
        (Out, row[0]),
        (Single, row[1]),
        (Double, row[2]),
        (Triple, row[3]),
        (HomeRun, row[4]),
    ])
}

/// Resolves the defensive outcome of a ball in play.
///
/// Draw order: the special-play draw (only when a special play is possible),
/// then the hit-table draw (only when no special play happened).
pub fn resolve_defense(
    batted: BattedBallType,
    contact: ContactQuality,
    situation: FieldingSituation,
    rng: &mut RngState,
) -> (AtBatResult, AtBatPlay) {
    if double_play_eligible(batted, situation) && rng.draw() < double_play_chance(contact) {
        let play = AtBatPlay {
            outs_added: 2,
            runs_scored: 0,
            runner_state_after: Some(RunnerState::Empty),
            batted_ball_type: Some(batted),
            contact: Some(contact),
            kind: PlayKind::DoublePlay,
            note: Some("grounded into a double play".to_owned()),
        };
        return (AtBatResult::Out, play);
    }

    if sacrifice_fly_eligible(batted, contact, situation) && rng.draw() < SACRIFICE_FLY {
        let play = AtBatPlay {
            outs_added: 1,
            runs_scored: 1,
            runner_state_after: Some(situation.runners.without_third()),
            batted_ball_type: Some(batted),
            contact: Some(contact),
            kind: PlayKind::SacrificeFly,
            note: Some("sacrifice fly".to_owned()),
        };
        return (AtBatResult::Out, play);
    }

    let result = weighted_roll(&hit_table(batted, contact), rng.draw());
    let play = AtBatPlay {
        outs_added: u8::from(result == AtBatResult::Out),
        runs_scored: 0,
        runner_state_after: None,
        batted_ball_type: Some(batted),
        contact: Some(contact),
        kind: PlayKind::BallInPlay,
        note: None,
    };
    (result, play)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayerId;

    const ALL_BATTED: [BattedBallType; 4] = [
        BattedBallType::Ground,
        BattedBallType::Fly,
        BattedBallType::Line,
        BattedBallType::Pop,
    ];
    const ALL_CONTACT: [ContactQuality; 3] = [
        ContactQuality::Weak,
        ContactQuality::Solid,
        ContactQuality::Crushed,
    ];

    #[test]
    fn hit_table_rows_are_closed() {
        for batted in ALL_BATTED {
            for contact in ALL_CONTACT {
                let table = hit_table(batted, contact);
                assert!(table.is_closed(), "{batted}/{contact}");
                assert_eq!(table.len(), 5);
            }
        }
    }

    #[test]
    fn double_play_rate_matches_weak_grounder_chance() {
        let situation = FieldingSituation {
            outs: 0,
            runners: RunnerState::First { first: PlayerId(7) },
        };
        let mut rng = RngState::new(2024);
        let trials = 100_000;
        let mut double_plays = 0u32;
        for _ in 0..trials {
            let (_, play) = resolve_defense(
                BattedBallType::Ground,
                ContactQuality::Weak,
                situation,
                &mut rng,
            );
            if play.is_double_play() {
                assert_eq!(play.outs_added, 2);
                assert_eq!(play.runner_state_after, Some(RunnerState::Empty));
                double_plays += 1;
            }
        }
        let rate = f64::from(double_plays) / f64::from(trials);
        assert!((rate - DOUBLE_PLAY_WEAK).abs() <= 0.01, "observed {rate}");
    }

    #[test]
    fn no_double_play_with_two_outs() {
        let situation = FieldingSituation {
            outs: 2,
            runners: RunnerState::First { first: PlayerId(7) },
        };
        let mut rng = RngState::new(9);
        for _ in 0..1_000 {
            let (_, play) = resolve_defense(
                BattedBallType::Ground,
                ContactQuality::Weak,
                situation,
                &mut rng,
            );
            assert!(!play.is_double_play());
        }
    }

    #[test]
    fn sacrifice_fly_scores_the_runner_from_third() {
        let situation = FieldingSituation {
            outs: 1,
            runners: RunnerState::Loaded {
                first: PlayerId(1),
                second: PlayerId(2),
                third: PlayerId(3),
            },
        };
        let mut rng = RngState::new(77);
        let mut seen = false;
        for _ in 0..200 {
            let (result, play) = resolve_defense(
                BattedBallType::Fly,
                ContactQuality::Solid,
                situation,
                &mut rng,
            );
            if play.is_sacrifice_fly() {
                assert_eq!(result, AtBatResult::Out);
                assert_eq!(play.runs_scored, 1);
                assert_eq!(
                    play.runner_state_after,
                    Some(RunnerState::FirstSecond {
                        first: PlayerId(1),
                        second: PlayerId(2),
                    })
                );
                seen = true;
            }
        }
        assert!(seen);
    }

    #[test]
    fn weak_fly_never_becomes_a_sacrifice() {
        let situation = FieldingSituation {
            outs: 0,
            runners: RunnerState::Third { third: PlayerId(3) },
        };
        let mut rng = RngState::new(5);
        for _ in 0..500 {
            let (_, play) = resolve_defense(
                BattedBallType::Fly,
                ContactQuality::Weak,
                situation,
                &mut rng,
            );
            assert!(!play.is_sacrifice_fly());
        }
    }
}

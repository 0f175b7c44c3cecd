//! Structural checks over a whole league state.
//!
//! Transitions never panic; this checker is for tests and debug runs. It is
//! wired into the engine through [`crate::SimConfig::check_invariants`].

use std::collections::BTreeSet;

use crate::state::{
    AtBatId, AtBatResult, Count, GameStatus, HalfInning, HalfInningId, LeagueState, PlayerId,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("half-inning {half} has {outs} outs")]
    OutsOutOfRange { half: HalfInningId, outs: u8 },

    #[error("at-bat {at_bat} has count {count}")]
    CountOutOfRange { at_bat: AtBatId, count: Count },

    #[error("at-bat {at_bat} ended in {result} with count {count}")]
    ResultContradictsCount {
        at_bat: AtBatId,
        result: AtBatResult,
        count: Count,
    },

    #[error("at-bat {0} reached a terminal count without a result")]
    UnresolvedTerminalCount(AtBatId),

    #[error("{pointer} pointer names missing {id}")]
    DanglingPointer { pointer: &'static str, id: String },

    #[error("{0} pointer is set without its parent")]
    BrokenPointerChain(&'static str),

    #[error("{pointer} pointer {id} does not belong to the active {parent}")]
    PointerMismatch {
        pointer: &'static str,
        id: String,
        parent: &'static str,
    },

    #[error("{owner} refers to missing {entity} {id}")]
    DanglingReference {
        owner: String,
        entity: &'static str,
        id: String,
    },

    #[error("runner {player} occupies two bases in half-inning {half}")]
    DuplicateRunner { half: HalfInningId, player: PlayerId },

    #[error("final game {0} is still pointed at")]
    FinalGameActive(String),
}

fn dangling(pointer: &'static str, id: impl ToString) -> InvariantViolation {
    InvariantViolation::DanglingPointer {
        pointer,
        id: id.to_string(),
    }
}

fn check_pointers(state: &LeagueState) -> Result<(), InvariantViolation> {
    let pointers = &state.pointers;

    if let Some(id) = pointers.season_id {
        if !state.seasons.contains_key(&id) {
            return Err(dangling("season", id));
        }
    }

    let game = match pointers.game_id {
        Some(id) => {
            let game = state.games.get(&id).ok_or_else(|| dangling("game", id))?;
            if game.status == GameStatus::Final {
                return Err(InvariantViolation::FinalGameActive(id.to_string()));
            }
            Some(game)
        }
        None => None,
    };

    let half = match pointers.half_inning_id {
        Some(id) => {
            let game = game.ok_or(InvariantViolation::BrokenPointerChain("half-inning"))?;
            let half = state
                .half_innings
                .get(&id)
                .ok_or_else(|| dangling("half-inning", id))?;
            if half.game_id != game.id || game.current_half_inning_id != Some(id) {
                return Err(InvariantViolation::PointerMismatch {
                    pointer: "half-inning",
                    id: id.to_string(),
                    parent: "game",
                });
            }
            Some(half)
        }
        None => None,
    };

    if let Some(id) = pointers.at_bat_id {
        let half = half.ok_or(InvariantViolation::BrokenPointerChain("at-bat"))?;
        let at_bat = state.at_bats.get(&id).ok_or_else(|| dangling("at-bat", id))?;
        if at_bat.half_inning_id != half.id {
            return Err(InvariantViolation::PointerMismatch {
                pointer: "at-bat",
                id: id.to_string(),
                parent: "half-inning",
            });
        }
    }
    Ok(())
}

fn check_half_inning(half: &HalfInning) -> Result<(), InvariantViolation> {
    if half.outs > HalfInning::MAX_OUTS {
        return Err(InvariantViolation::OutsOutOfRange {
            half: half.id,
            outs: half.outs,
        });
    }
    let mut seen = BTreeSet::new();
    for player in half.runner_state.runners() {
        if !seen.insert(player) {
            return Err(InvariantViolation::DuplicateRunner {
                half: half.id,
                player,
            });
        }
    }
    Ok(())
}

fn check_records(state: &LeagueState) -> Result<(), InvariantViolation> {
    for half in state.half_innings.values() {
        check_half_inning(half)?;
        if !state.games.contains_key(&half.game_id) {
            return Err(InvariantViolation::DanglingReference {
                owner: half.id.to_string(),
                entity: "game",
                id: half.game_id.to_string(),
            });
        }
    }

    for at_bat in state.at_bats.values() {
        let count = at_bat.count;
        if !count.is_valid() {
            return Err(InvariantViolation::CountOutOfRange {
                at_bat: at_bat.id,
                count,
            });
        }
        let contradicts = match at_bat.result {
            Some(AtBatResult::Strikeout) => !count.is_strikeout(),
            Some(AtBatResult::Walk) => !count.is_walk(),
            Some(_) => count.is_strikeout() || count.is_walk(),
            None => {
                if count.is_strikeout() || count.is_walk() {
                    return Err(InvariantViolation::UnresolvedTerminalCount(at_bat.id));
                }
                false
            }
        };
        if let (true, Some(result)) = (contradicts, at_bat.result) {
            return Err(InvariantViolation::ResultContradictsCount {
                at_bat: at_bat.id,
                result,
                count,
            });
        }
        if !state.half_innings.contains_key(&at_bat.half_inning_id) {
            return Err(InvariantViolation::DanglingReference {
                owner: at_bat.id.to_string(),
                entity: "half-inning",
                id: at_bat.half_inning_id.to_string(),
            });
        }
        for pitch in &at_bat.pitch_ids {
            if !state.pitches.contains_key(pitch) {
                return Err(InvariantViolation::DanglingReference {
                    owner: at_bat.id.to_string(),
                    entity: "pitch",
                    id: pitch.to_string(),
                });
            }
        }
    }

    for game in state.games.values() {
        for team in [game.home.team_id, game.away.team_id] {
            if !state.teams.contains_key(&team) {
                return Err(InvariantViolation::DanglingReference {
                    owner: game.id.to_string(),
                    entity: "team",
                    id: team.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Checks every structural invariant of `state`.
///
/// - outs stay in `0..=3` and counts within `4` balls and `3` strikes;
/// - strikeouts carry three strikes and walks four balls;
/// - every set pointer names an existing entity, and the game, half-inning
///   and at-bat pointers form a consistent chain;
/// - no runner stands on two bases.
pub fn check_invariants(state: &LeagueState) -> Result<(), InvariantViolation> {
    check_pointers(state)?;
    check_records(state)
}

/// Panics with the first violation found.
#[track_caller]
pub fn assert_invariants(state: &LeagueState) {
    if let Err(violation) = check_invariants(state) {
        panic!("league state invariant violated: {violation}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AtBat, GameId, RunnerState, Side, TeamId};

    fn half(outs: u8) -> HalfInning {
        HalfInning {
            id: HalfInningId(1),
            game_id: GameId(1),
            inning_number: 1,
            side: Side::Top,
            batting_team_id: TeamId(2),
            fielding_team_id: TeamId(1),
            outs,
            runner_state: RunnerState::Empty,
            lineup_index: 0,
            runs: 0,
            at_bat_ids: Vec::new(),
            current_at_bat_id: None,
        }
    }

    #[test]
    fn empty_state_is_valid() {
        assert_eq!(check_invariants(&LeagueState::with_seed(1)), Ok(()));
    }

    #[test]
    fn four_outs_is_a_violation() {
        assert!(matches!(
            check_half_inning(&half(4)),
            Err(InvariantViolation::OutsOutOfRange { outs: 4, .. })
        ));
        assert_eq!(check_half_inning(&half(3)), Ok(()));
    }

    #[test]
    fn same_runner_on_two_bases_is_a_violation() {
        let mut doubled = half(0);
        doubled.runner_state = RunnerState::FirstSecond {
            first: PlayerId(7),
            second: PlayerId(7),
        };
        assert!(matches!(
            check_half_inning(&doubled),
            Err(InvariantViolation::DuplicateRunner { .. })
        ));
    }

    #[test]
    fn dangling_pointer_is_a_violation() {
        let mut state = LeagueState::with_seed(1);
        state.pointers.game_id = Some(GameId(9));
        assert!(matches!(
            check_invariants(&state),
            Err(InvariantViolation::DanglingPointer { pointer: "game", .. })
        ));
    }

    #[test]
    fn at_bat_pointer_needs_half_inning_pointer() {
        let mut state = LeagueState::with_seed(1);
        let at_bat = AtBat::open(AtBatId(1), HalfInningId(1), PlayerId(1), PlayerId(2));
        state.at_bats.insert(at_bat.id, at_bat);
        state.pointers.at_bat_id = Some(AtBatId(1));
        assert_eq!(
            check_pointers(&state),
            Err(InvariantViolation::BrokenPointerChain("at-bat"))
        );
    }

    #[test]
    fn strikeout_needs_three_strikes() {
        let mut state = LeagueState::with_seed(1);
        let mut at_bat = AtBat::open(AtBatId(1), HalfInningId(1), PlayerId(1), PlayerId(2));
        at_bat.count = Count::new(0, 2);
        at_bat.result = Some(AtBatResult::Strikeout);
        state.at_bats.insert(at_bat.id, at_bat);
        assert!(matches!(
            check_records(&state),
            Err(InvariantViolation::ResultContradictsCount {
                result: AtBatResult::Strikeout,
                ..
            })
        ));
    }
}

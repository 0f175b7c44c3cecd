//! Box score construction from a finished game's records.
//!
//! Runs batted in and runners left on base are recovered by replaying each
//! half-inning's at-bats through the same settlement the live game used.

use crate::play::{PlayError, settle};
use crate::state::{
    AtBatResult, BatterBox, BattingLine, BoxScore, GameId, InningLine, LeagueState, PlayerId,
    RunnerState, Side, TeamBox, TeamId, TeamTotals,
};

fn team_box(team_id: TeamId) -> TeamBox {
    TeamBox {
        team_id,
        totals: TeamTotals::default(),
        batters: Vec::new(),
    }
}

fn batter_line(team: &mut TeamBox, player_id: PlayerId) -> &mut BattingLine {
    let index = match team.batters.iter().position(|b| b.player_id == player_id) {
        Some(index) => index,
        None => {
            team.batters.push(BatterBox {
                player_id,
                line: BattingLine::default(),
            });
            team.batters.len() - 1
        }
    };
    &mut team.batters[index].line
}

pub fn build_box_score(state: &LeagueState, game_id: GameId) -> Result<BoxScore, PlayError> {
    let game = state
        .games
        .get(&game_id)
        .ok_or_else(|| PlayError::missing("game", game_id))?;

    let mut away = team_box(game.away.team_id);
    let mut home = team_box(game.home.team_id);
    let mut line_score: Vec<InningLine> = Vec::new();

    for half_id in &game.half_inning_ids {
        let half = state
            .half_innings
            .get(half_id)
            .ok_or_else(|| PlayError::missing("half-inning", half_id))?;
        let team = match half.side {
            Side::Top => &mut away,
            Side::Bottom => &mut home,
        };

        let mut runners = RunnerState::Empty;
        for at_bat_id in &half.at_bat_ids {
            let at_bat = state
                .at_bats
                .get(at_bat_id)
                .ok_or_else(|| PlayError::missing("at-bat", at_bat_id))?;
            let Some(result) = at_bat.result else {
                continue;
            };
            let play = at_bat.play.as_ref();
            let settled = settle(runners, at_bat.batter_id, result, play);
            runners = settled.runners;

            let rbi = if play.is_some_and(|play| play.is_double_play()) {
                0
            } else {
                u32::from(settled.runs)
            };
            batter_line(team, at_bat.batter_id).record(result, play, rbi);

            let totals = &mut team.totals;
            if result.is_hit() {
                totals.hits += 1;
            }
            match result {
                AtBatResult::Walk => totals.walks += 1,
                AtBatResult::Strikeout => totals.strikeouts += 1,
                AtBatResult::HomeRun => totals.home_runs += 1,
                _ => {}
            }
        }

        team.totals.runs += u32::from(half.runs);
        if half.is_complete() {
            team.totals.left_on_base += u32::from(runners.runner_count());
        }

        match half.side {
            Side::Top => line_score.push(InningLine {
                inning: half.inning_number,
                away: half.runs,
                home: None,
            }),
            Side::Bottom => {
                if let Some(line) = line_score
                    .iter_mut()
                    .rev()
                    .find(|line| line.inning == half.inning_number)
                {
                    line.home = Some(half.runs);
                }
            }
        }
    }

    let summary = summarize(
        state,
        game.away.team_id,
        game.home.team_id,
        &away,
        &home,
        line_score.len(),
    );

    Ok(BoxScore {
        game_id,
        summary,
        away,
        home,
        line_score,
    })
}

fn summarize(
    state: &LeagueState,
    away_id: TeamId,
    home_id: TeamId,
    away: &TeamBox,
    home: &TeamBox,
    innings: usize,
) -> String {
    let away_name = state.team_abbreviation(away_id);
    let home_name = state.team_abbreviation(home_id);
    let (away_runs, home_runs) = (away.totals.runs, home.totals.runs);
    let headline = if away_runs > home_runs {
        format!("{away_name} {away_runs}, {home_name} {home_runs}")
    } else {
        format!("{home_name} {home_runs}, {away_name} {away_runs}")
    };
    format!(
        "Final: {headline} ({innings} inn; H {}-{})",
        away.totals.hits, home.totals.hits
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        AtBat, AtBatId, Game, GameSide, GameStatus, HalfInning, HalfInningId, Score,
    };

    fn resolved(id: u32, half: HalfInningId, batter: u32, result: AtBatResult) -> AtBat {
        AtBat {
            result: Some(result),
            ..AtBat::open(AtBatId(id), half, PlayerId(batter), PlayerId(50))
        }
    }

    fn half(id: u32, inning: u16, side: Side, at_bats: Vec<AtBatId>, runs: u16) -> HalfInning {
        HalfInning {
            id: HalfInningId(id),
            game_id: GameId(1),
            inning_number: inning,
            side,
            batting_team_id: if side == Side::Top { TeamId(2) } else { TeamId(1) },
            fielding_team_id: if side == Side::Top { TeamId(1) } else { TeamId(2) },
            outs: 3,
            runner_state: RunnerState::Empty,
            lineup_index: 0,
            runs,
            at_bat_ids: at_bats,
            current_at_bat_id: None,
        }
    }

    #[test]
    fn replays_runs_batted_in_and_line_score() {
        let mut state = LeagueState::with_seed(1);
        let top = HalfInningId(1);
        let bottom = HalfInningId(2);
        let at_bats = [
            resolved(1, top, 10, AtBatResult::Walk),
            resolved(2, top, 11, AtBatResult::HomeRun),
            resolved(3, top, 12, AtBatResult::Strikeout),
            resolved(4, top, 13, AtBatResult::Single),
            resolved(5, top, 14, AtBatResult::Strikeout),
            resolved(6, top, 15, AtBatResult::Strikeout),
            resolved(7, bottom, 20, AtBatResult::Strikeout),
        ];
        for at_bat in at_bats {
            state.at_bats.insert(at_bat.id, at_bat);
        }
        state.half_innings.insert(
            top,
            half(1, 1, Side::Top, (1..=6).map(AtBatId).collect(), 2),
        );
        state
            .half_innings
            .insert(bottom, half(2, 1, Side::Bottom, vec![AtBatId(7)], 0));
        state.games.insert(
            GameId(1),
            Game {
                id: GameId(1),
                season_id: None,
                schedule_index: None,
                home: GameSide {
                    team_id: TeamId(1),
                    pitcher_id: PlayerId(50),
                    next_lineup_index: 0,
                },
                away: GameSide {
                    team_id: TeamId(2),
                    pitcher_id: PlayerId(51),
                    next_lineup_index: 0,
                },
                status: GameStatus::Final,
                score: Score { home: 0, away: 2 },
                half_inning_ids: vec![top, bottom],
                current_half_inning_id: None,
            },
        );

        let box_score = build_box_score(&state, GameId(1)).expect("box score");
        assert_eq!(box_score.away.totals.runs, 2);
        assert_eq!(box_score.away.totals.hits, 2);
        assert_eq!(box_score.away.totals.walks, 1);
        assert_eq!(box_score.away.totals.strikeouts, 3);
        assert_eq!(box_score.away.totals.left_on_base, 1);

        let slugger = box_score
            .away
            .batters
            .iter()
            .find(|b| b.player_id == PlayerId(11))
            .expect("batter line");
        assert_eq!(slugger.line.runs_batted_in, 2);
        assert_eq!(slugger.line.home_runs, 1);

        assert_eq!(
            box_score.line_score,
            vec![InningLine {
                inning: 1,
                away: 2,
                home: Some(0),
            }]
        );
        assert!(box_score.summary.starts_with("Final: T-2 2, T-1 0"));
    }
}

//! Plain-text tables for standings, leaders and box scores.

use std::io::{self, Write};

use ballpark_core::{BoxScore, LeagueState, Season, state::TeamBox};

pub fn standings(out: &mut impl Write, state: &LeagueState, season: &Season) -> io::Result<()> {
    writeln!(out, "{} season, day {}", season.year, season.day)?;
    writeln!(
        out,
        "{:<5} {:>4} {:>4} {:>4} {:>6} {:>5} {:>5} {:>5}",
        "TEAM", "W", "L", "T", "PCT", "RS", "RA", "DIFF"
    )?;
    for row in season.sorted_standings() {
        writeln!(
            out,
            "{:<5} {:>4} {:>4} {:>4} {:>6.3} {:>5} {:>5} {:>+5}",
            state.team_abbreviation(row.team_id),
            row.wins,
            row.losses,
            row.ties,
            row.win_pct(),
            row.runs_scored,
            row.runs_allowed,
            row.run_differential(),
        )?;
    }
    Ok(())
}

/// Top `limit` hitters by average among batters with `min_pa` plate
/// appearances, then the home run leaders.
pub fn batting_leaders(
    out: &mut impl Write,
    state: &LeagueState,
    season: &Season,
    limit: usize,
    min_pa: u32,
) -> io::Result<()> {
    let mut qualified: Vec<_> = season
        .batting
        .iter()
        .filter(|(_, line)| line.plate_appearances >= min_pa)
        .collect();

    qualified.sort_by(|(a_id, a), (b_id, b)| {
        b.average()
            .total_cmp(&a.average())
            .then_with(|| a_id.cmp(b_id))
    });
    writeln!(out, "Batting average (min {min_pa} PA)")?;
    for (id, line) in qualified.iter().take(limit) {
        writeln!(
            out,
            "  {:<18} {:.3}  {}-for-{}",
            state.player_name(**id),
            line.average(),
            line.hits,
            line.at_bats
        )?;
    }

    let mut sluggers: Vec<_> = season.batting.iter().collect();
    sluggers.sort_by(|(a_id, a), (b_id, b)| {
        b.home_runs.cmp(&a.home_runs).then_with(|| a_id.cmp(b_id))
    });
    writeln!(out, "Home runs")?;
    for (id, line) in sluggers.iter().take(limit) {
        writeln!(
            out,
            "  {:<18} {:>3}  {} RBI",
            state.player_name(**id),
            line.home_runs,
            line.runs_batted_in
        )?;
    }
    Ok(())
}

pub fn box_score(out: &mut impl Write, state: &LeagueState, score: &BoxScore) -> io::Result<()> {
    writeln!(out, "{}", score.summary)?;

    write!(out, "{:<5}", "")?;
    for inning in &score.line_score {
        write!(out, " {:>2}", inning.inning)?;
    }
    writeln!(out, "   {:>2} {:>2}", "R", "H")?;

    let away = state.team_abbreviation(score.away.team_id);
    write!(out, "{away:<5}")?;
    for inning in &score.line_score {
        write!(out, " {:>2}", inning.away)?;
    }
    writeln!(out, "   {:>2} {:>2}", score.away.totals.runs, score.away.totals.hits)?;

    let home = state.team_abbreviation(score.home.team_id);
    write!(out, "{home:<5}")?;
    for inning in &score.line_score {
        match inning.home {
            Some(runs) => write!(out, " {runs:>2}")?,
            None => write!(out, " {:>2}", "x")?,
        }
    }
    writeln!(out, "   {:>2} {:>2}", score.home.totals.runs, score.home.totals.hits)?;

    batters(out, state, &score.away)?;
    batters(out, state, &score.home)
}

fn batters(out: &mut impl Write, state: &LeagueState, side: &TeamBox) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{:<18} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
        state.team_abbreviation(side.team_id),
        "AB",
        "H",
        "HR",
        "RBI",
        "BB",
        "K"
    )?;
    for batter in &side.batters {
        let line = &batter.line;
        writeln!(
            out,
            "{:<18} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
            state.player_name(batter.player_id),
            line.at_bats,
            line.hits,
            line.home_runs,
            line.runs_batted_in,
            line.walks,
            line.strikeouts
        )?;
    }
    writeln!(out, "LOB {}", side.totals.left_on_base)
}

#[cfg(test)]
mod tests {
    use ballpark_content::demo_league;
    use ballpark_core::{Action, ActionResult, SimConfig, TeamId, dispatch, reducer};

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn box_score_lists_both_lineups() {
        let config = SimConfig::default();
        let state = reducer(&LeagueState::default(), &Action::new_league(demo_league(2, 21)));
        let state = reducer(&state, &Action::exhibition(TeamId(1), TeamId(2)));
        let step = dispatch(
            &state,
            &Action::SimGame(ballpark_core::action::SimGameAction),
            &config,
        );
        let Some(ActionResult::Game(run)) = step.result() else {
            panic!("{:?}", step.diagnostic);
        };
        let score = &step.state.box_scores[&run.game_id];

        let text = render(|out| box_score(out, &step.state, score));
        assert!(text.starts_with(&score.summary));
        assert!(text.contains("HAR"));
        assert!(text.contains("MES"));
        assert_eq!(text.matches("LOB").count(), 2);
    }

    #[test]
    fn standings_list_every_team() {
        let config = SimConfig {
            games_per_matchup: 1,
            ..SimConfig::default()
        };
        let state = reducer(&LeagueState::default(), &Action::new_league(demo_league(4, 2)));
        let step = dispatch(
            &state,
            &Action::SimSeason(ballpark_core::action::SimSeasonAction),
            &config,
        );
        let season = step.state.current_season().expect("season");

        let text = render(|out| standings(out, &step.state, season));
        assert_eq!(text.lines().count(), 2 + 4);

        let leaders = render(|out| batting_leaders(out, &step.state, season, 3, 1));
        assert!(leaders.contains("Batting average"));
        assert!(leaders.contains("Home runs"));
    }
}

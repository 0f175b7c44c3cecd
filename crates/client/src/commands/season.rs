//! Simulate a full regular season and print the standings.

use std::io::Write;

use anyhow::{Context, Result, bail};
use ballpark_core::{Action, ActionResult, action::SimSeasonAction};
use clap::Parser;
use runtime::Runtime;

use super::LeagueArgs;
use crate::report;

#[derive(Parser, Debug)]
pub struct SeasonCmd {
    #[command(flatten)]
    league: LeagueArgs,

    /// Rows per leaderboard
    #[arg(long, default_value_t = 5)]
    leaders: usize,

    /// Plate appearances needed to qualify for the batting title
    #[arg(long, default_value_t = 20)]
    min_pa: u32,
}

impl SeasonCmd {
    pub async fn execute(self) -> Result<()> {
        let (league, config) = self.league.load()?;
        tracing::info!(teams = league.teams.len(), seed = league.seed, "starting season");

        let runtime = Runtime::builder().config(config).build().await?;
        let handle = runtime.handle();

        let created = handle.submit(Action::new_league(league)).await?;
        if let Some(diagnostic) = created.diagnostics.first() {
            bail!("league rejected: {diagnostic}");
        }

        let run = handle.submit(Action::SimSeason(SimSeasonAction)).await?;
        let Some(ActionResult::Season(season_report)) = run.results.first() else {
            let reason = run
                .diagnostics
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| "no result".into());
            bail!("season did not run: {reason}");
        };
        if let Some(runaway) = &season_report.runaway {
            tracing::warn!(game = %runaway.game_id, "season stopped on a runaway game");
        }

        let state = handle.query_state().await?;
        let season = state.current_season().context("league has no season")?;

        let mut out = std::io::stdout().lock();
        report::standings(&mut out, &state, season)?;
        writeln!(out)?;
        report::batting_leaders(&mut out, &state, season, self.leaders, self.min_pa)?;
        writeln!(out)?;
        writeln!(
            out,
            "{} games over {} days, state root {}",
            season_report.games_played,
            season_report.days,
            run.state_root().unwrap_or("-")
        )?;
        drop(out);

        drop(handle);
        runtime.shutdown().await?;
        Ok(())
    }
}

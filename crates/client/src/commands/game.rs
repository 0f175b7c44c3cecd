//! Play one exhibition pitch by pitch with the automatic manager.

use anyhow::{Context, Result, bail};
use ballpark_core::{Action, ActionResult, TeamId};
use clap::Parser;
use runtime::{AutoManager, Runtime};

use super::LeagueArgs;
use crate::report;

#[derive(Parser, Debug)]
pub struct GameCmd {
    #[command(flatten)]
    league: LeagueArgs,

    /// Home club id
    #[arg(long, default_value_t = 1)]
    home: u32,

    /// Visiting club id
    #[arg(long, default_value_t = 2)]
    away: u32,

    /// Seed for the manager's pitch calls
    #[arg(long, default_value_t = 7)]
    manager_seed: u32,

    /// Stop after this many pitches
    #[arg(long, default_value_t = 2_000)]
    max_pitches: usize,
}

impl GameCmd {
    pub async fn execute(self) -> Result<()> {
        let (league, config) = self.league.load()?;
        let mut runtime = Runtime::builder()
            .config(config)
            .provider(AutoManager::new(self.manager_seed))
            .build()
            .await?;
        let handle = runtime.handle();

        let created = handle.submit(Action::new_league(league)).await?;
        if let Some(diagnostic) = created.diagnostics.first() {
            bail!("league rejected: {diagnostic}");
        }
        let start = handle
            .submit(Action::exhibition(TeamId(self.home), TeamId(self.away)))
            .await?;
        let Some(&ActionResult::GameStarted(game_id)) = start.results.first() else {
            bail!("game did not start: {:?}", start.diagnostics.first());
        };

        let pitches = runtime.run_until_idle(self.max_pitches).await?;

        let state = handle.query_state().await?;
        let game = state.games.get(&game_id).context("game vanished")?;
        tracing::info!(
            %game_id,
            pitches,
            half_innings = game.half_inning_ids.len(),
            "exhibition settled"
        );
        if !game.is_final() {
            bail!("{game_id} still in progress after {pitches} pitches");
        }
        let score = state
            .box_scores
            .get(&game_id)
            .context("final game has no box score")?;

        let mut out = std::io::stdout().lock();
        report::box_score(&mut out, &state, score)?;
        drop(out);

        drop(handle);
        runtime.shutdown().await?;
        Ok(())
    }
}

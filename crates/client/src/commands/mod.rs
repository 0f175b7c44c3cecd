mod game;
mod replay;
mod season;

pub use game::GameCmd;
pub use replay::ReplayCmd;
pub use season::SeasonCmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use ballpark_content::{ContentFactory, demo_league};
use ballpark_core::{LeagueSeed, SimConfig};
use clap::Args;
use runtime::RuntimeConfig;

/// Where the league comes from: a data directory or the generated demo.
#[derive(Args, Debug, Clone)]
pub struct LeagueArgs {
    /// Directory holding league.ron and an optional config.toml
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Number of clubs in the generated demo league
    #[arg(short, long, default_value_t = 4, conflicts_with = "data")]
    teams: usize,

    /// League seed; overrides BALLPARK_SEED
    #[arg(short, long)]
    seed: Option<u32>,
}

impl LeagueArgs {
    /// Resolves the league and the runtime config for this run.
    ///
    /// Gameplay tunables come from the data directory; engine limits and
    /// persistence come from the environment.
    pub fn load(&self) -> Result<(LeagueSeed, RuntimeConfig)> {
        let mut config = RuntimeConfig::from_env()?;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        let league = match &self.data {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let tunables = factory.load_config()?;
                config.sim = merge_sim(tunables, &config.sim);
                let mut league = factory
                    .load_league()
                    .with_context(|| format!("loading league from {}", dir.display()))?;
                if let Some(seed) = self.seed {
                    league.seed = seed;
                }
                league
            }
            None => demo_league(self.teams, config.seed),
        };
        config.seed = league.seed;
        Ok((league, config))
    }
}

fn merge_sim(tunables: SimConfig, env: &SimConfig) -> SimConfig {
    SimConfig {
        check_invariants: tunables.check_invariants || env.check_invariants,
        max_follow_ups: env.max_follow_ups,
        ..tunables
    }
}

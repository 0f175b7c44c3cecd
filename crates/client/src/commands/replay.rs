//! Re-run a saved journal and check every recorded state root.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ballpark_core::LeagueState;
use clap::Parser;
use runtime::{FileJournal, RuntimeConfig, Session, default_save_dir};

#[derive(Parser, Debug)]
pub struct ReplayCmd {
    /// Session id (the directory name under the save dir)
    #[arg(value_name = "SESSION")]
    session: String,

    /// Save directory; defaults to BALLPARK_SAVE_DIR or the platform data dir
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

impl ReplayCmd {
    pub fn execute(self) -> Result<()> {
        let config = RuntimeConfig::from_env()?;
        let save_dir = self
            .save_dir
            .or(config.save_dir)
            .or_else(default_save_dir)
            .context("no save directory configured")?;

        let path = save_dir
            .join(&self.session)
            .join(format!("{}.journal.jsonl", self.session));
        let entries = FileJournal::read(&path)
            .with_context(|| format!("reading journal {}", path.display()))?;
        tracing::info!(entries = entries.len(), path = %path.display(), "replaying journal");

        let initial = LeagueState::with_seed(config.seed);
        let session = Session::verify_replay(initial, config.sim, &entries)?;
        println!(
            "{} steps verified, clock {}, state root {}",
            entries.len(),
            session.state().clock,
            session.state_root_hex()?
        );
        Ok(())
    }
}

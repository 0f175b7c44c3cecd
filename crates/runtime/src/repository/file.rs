//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use ballpark_core::{LeagueState, Tick};

use super::{RepositoryError, Result, StateRepository};

/// File-based implementation of StateRepository.
///
/// States are stored as `state_{clock}.bin` in bincode format, the same
/// encoding the engine hashes for state roots.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn state_path(&self, clock: Tick) -> PathBuf {
        self.base_dir.join(format!("state_{}.bin", clock.0))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, clock: Tick, state: &LeagueState) -> Result<()> {
        let path = self.state_path(clock);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(%clock, path = %path.display(), "saved league state");
        Ok(())
    }

    fn load(&self, clock: Tick) -> Result<Option<LeagueState>> {
        let path = self.state_path(clock);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: LeagueState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!(%clock, path = %path.display(), "loaded league state");
        Ok(Some(state))
    }

    fn exists(&self, clock: Tick) -> bool {
        self.state_path(clock).exists()
    }

    fn delete(&self, clock: Tick) -> Result<()> {
        let path = self.state_path(clock);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(%clock, "deleted league state");
        }
        Ok(())
    }

    fn list_clocks(&self) -> Result<Vec<Tick>> {
        let mut clocks = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(raw) = filename
                    .strip_prefix("state_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(clock) = raw.parse::<u64>()
            {
                clocks.push(Tick(clock));
            }
        }
        clocks.sort_unstable();
        Ok(clocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("saves")).unwrap();
        let mut state = LeagueState::with_seed(41);
        state.clock = Tick(7);

        repo.save(state.clock, &state).unwrap();
        assert!(repo.exists(Tick(7)));
        assert_eq!(repo.load(Tick(7)).unwrap(), Some(state.clone()));
        assert_eq!(repo.load(Tick(8)).unwrap(), None);
        assert_eq!(repo.list_clocks().unwrap(), vec![Tick(7)]);
    }

    #[test]
    fn ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::write(dir.path().join("state_x.bin"), "junk").unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        assert!(repo.list_clocks().unwrap().is_empty());
        assert!(repo.load_latest().unwrap().is_none());
    }
}

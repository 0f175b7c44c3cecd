//! Content factory for building a league from a data directory.

use std::path::{Path, PathBuf};

use ballpark_core::{LeagueSeed, SimConfig};

use crate::loaders::{ConfigLoader, LeagueLoader, LoadResult};

/// Content factory that loads all league content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional)
/// └── league.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const LEAGUE_FILE: &'static str = "league.ron";
    pub const CONFIG_FILE: &'static str = "config.toml";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load teams and players from `league.ron`.
    pub fn load_league(&self) -> LoadResult<LeagueSeed> {
        LeagueLoader::load(&self.data_dir.join(Self::LEAGUE_FILE))
    }

    /// Load tunables from `config.toml`, falling back to the defaults when
    /// the file is absent.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_is_the_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("default"), SimConfig::default());
        assert!(factory.load_league().is_err());
    }
}

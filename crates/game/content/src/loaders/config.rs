//! Simulation tunables loader.

use std::path::Path;

use ballpark_core::SimConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`SimConfig`] from TOML files.
///
/// Keys left out of the file keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<SimConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SimConfig> {
        let config: SimConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.games_per_matchup == 0 {
            anyhow::bail!("games_per_matchup must be at least 1");
        }
        if config.regulation_innings == 0 {
            anyhow::bail!("regulation_innings must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let config = ConfigLoader::parse("games_per_matchup = 2\ncheck_invariants = true\n")
            .expect("valid config");
        assert_eq!(config.games_per_matchup, 2);
        assert!(config.check_invariants);
        assert_eq!(config.max_half_innings, SimConfig::DEFAULT_MAX_HALF_INNINGS);
        assert_eq!(config.regulation_innings, SimConfig::DEFAULT_REGULATION_INNINGS);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").expect("empty"), SimConfig::default());
    }

    #[test]
    fn zero_meetings_is_rejected() {
        let err = ConfigLoader::parse("games_per_matchup = 0").unwrap_err();
        assert!(err.to_string().contains("games_per_matchup"));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_half_innings = 30\n").expect("write");
        assert_eq!(ConfigLoader::load(&path).expect("load").max_half_innings, 30);
    }
}

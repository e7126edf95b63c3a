//! CLI configuration loaded from `questionary.toml`.
//!
//! Every field has a default; flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "questionary.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Statistics file location.
    #[serde(default = "default_stats_path")]
    pub path: PathBuf,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            path: default_stats_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewsConfig {
    /// How many recent tests the trend view shows.
    #[serde(default = "default_trend_limit")]
    pub trend_limit: usize,
    /// How many achievements the recent-achievements view shows.
    #[serde(default = "default_achievements_limit")]
    pub achievements_limit: usize,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            trend_limit: default_trend_limit(),
            achievements_limit: default_achievements_limit(),
        }
    }
}

fn default_stats_path() -> PathBuf {
    PathBuf::from("stats.json")
}

fn default_trend_limit() -> usize {
    10
}

fn default_achievements_limit() -> usize {
    5
}

/// Load `questionary.toml` from the working directory, falling back to
/// defaults when the file does not exist.
pub fn load() -> Result<Config> {
    load_from(Path::new(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// The stats path to use: the flag when given, the config value otherwise.
pub fn stats_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| config.stats.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.stats.path, PathBuf::from("stats.json"));
        assert_eq!(config.views.trend_limit, 10);
        assert_eq!(config.views.achievements_limit, 5);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[stats]\npath = \"custom.json\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.stats.path, PathBuf::from("custom.json"));
        assert_eq!(config.views.trend_limit, 10);
    }

    #[test]
    fn flag_overrides_config() {
        let config = Config::default();
        let path = stats_path(Some(PathBuf::from("flag.json")), &config);
        assert_eq!(path, PathBuf::from("flag.json"));
        assert_eq!(stats_path(None, &config), PathBuf::from("stats.json"));
    }
}

//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::debounce::DEFAULT_DELAY;

/// Public site used in share links when none is configured.
pub const DEFAULT_SITE_URL: &str = "https://notes.alokdasofficial.in";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default data directory
    pub dir: Option<PathBuf>,

    /// Base URL for share and deep links
    pub site_url: Option<String>,

    /// Idle time before a search is logged
    pub debounce_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/classnotes/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("classnotes")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. The platform data directory
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("classnotes")
            })
    }

    pub fn site_url(&self) -> &str {
        self.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL)
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_dir() {
        let config = Config::default();
        assert!(config.dir.is_none());
        assert_eq!(config.site_url(), DEFAULT_SITE_URL);
        assert_eq!(config.debounce(), Duration::from_millis(2000));
    }

    #[test]
    fn data_dir_prefers_cli_arg() {
        let config = Config {
            dir: Some(PathBuf::from("/config/data")),
            ..Default::default()
        };
        let cli_dir = PathBuf::from("/cli/data");
        assert_eq!(config.data_dir(Some(&cli_dir)), PathBuf::from("/cli/data"));
    }

    #[test]
    fn data_dir_falls_back_to_config() {
        let config = Config {
            dir: Some(PathBuf::from("/config/data")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(None), PathBuf::from("/config/data"));
    }

    #[test]
    fn data_dir_defaults_to_platform_dir() {
        assert!(Config::default().data_dir(None).ends_with("classnotes"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("classnotes/config.toml"));
    }

    #[test]
    fn parses_all_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "dir = \"/srv/classnotes\"\nsite_url = \"https://notes.example/\"\ndebounce_ms = 500\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("/srv/classnotes")));
        assert_eq!(config.site_url(), "https://notes.example/");
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.site_url.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

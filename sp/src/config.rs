//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR); `--log-level` takes priority
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Where prompt overrides are looked up
    pub prompts: PromptsConfig,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// A config file that exists but cannot be read or parsed is an error; defaults
    /// are only used when no file is found.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let Some(path) = Self::find_config(config_path) else {
            tracing::info!("No config file found, using defaults");
            return Ok(Self::default());
        };

        Self::load_from_file(&path).context(format!("Failed to load config from {}", path.display()))
    }

    /// Read only the log level, before logging is set up; any failure yields `None`
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let path = Self::find_config(config_path)?;
        let content = fs::read_to_string(path).ok()?;
        serde_yaml::from_str::<Self>(&content).ok()?.log_level
    }

    /// Resolve which config file applies
    ///
    /// Checks in order:
    /// 1. Explicit `--config` path (returned even if missing, so loading reports it)
    /// 2. Project-local `sarcasm-prompts.yml`
    /// 3. User config `~/.config/sarcasm-prompts/config.yml`
    fn find_config(config_path: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = config_path {
            return Some(path.clone());
        }

        let local_config = PathBuf::from("sarcasm-prompts.yml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("sarcasm-prompts").join("config.yml"))
            .filter(|path| path.exists())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Prompt override directories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Per-user overrides, checked first
    #[serde(rename = "user-dir")]
    pub user_dir: PathBuf,

    /// Overrides shipped with a repo, checked second
    #[serde(rename = "repo-dir")]
    pub repo_dir: PathBuf,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            user_dir: PathBuf::from(".sarcasm-prompts/prompts"),
            repo_dir: PathBuf::from("prompts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.log_level.is_none());
        assert_eq!(config.prompts.user_dir, PathBuf::from(".sarcasm-prompts/prompts"));
        assert_eq!(config.prompts.repo_dir, PathBuf::from("prompts"));
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug
prompts:
  user-dir: /home/me/prompts
  repo-dir: shared/prompts
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.prompts.user_dir, PathBuf::from("/home/me/prompts"));
        assert_eq!(config.prompts.repo_dir, PathBuf::from("shared/prompts"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
prompts:
  repo-dir: elsewhere
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.log_level.is_none());
        assert_eq!(config.prompts.user_dir, PathBuf::from(".sarcasm-prompts/prompts"));
        assert_eq!(config.prompts.repo_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "log-level: warn\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "prompts: [not, a, mapping\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.yml"));
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    fn test_load_log_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "log-level: trace\nprompts:\n  repo-dir: shared\n").unwrap();

        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("trace"));
        assert!(Config::load_log_level(Some(&dir.path().join("missing.yml"))).is_none());
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let path = PathBuf::from("/nonexistent/sarcasm-prompts.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sarcasm-prompts.yml"));
    }
}

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "prompt-engine";
pub const CONFIG_FILE: &str = "prompt-engine.yaml";

/// Main prompt-engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Root of the template library (blueprints/, instructions/, tools/)
    pub templates_dir: PathBuf,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: Self::app_dir().join("templates"),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("PROMPT_ENGINE_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from PROMPT_ENGINE_CONFIG: {}", e);
                    }
                }
            }
        }

        if let Ok(app_dir) = std::env::var("PROMPT_ENGINE_DIR") {
            let path = PathBuf::from(app_dir).join(CONFIG_FILE);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from PROMPT_ENGINE_DIR: {}", e);
                    }
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join(APP_NAME).join(CONFIG_FILE);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // ./prompt-engine.yaml (for development)
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Directory holding the config file and the default template library
    pub fn app_dir() -> PathBuf {
        std::env::var("PROMPT_ENGINE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME))
    }

    /// Effective template library root.
    /// Precedence: explicit override, PROMPT_ENGINE_TEMPLATES, config value.
    pub fn templates_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli_override {
            return Self::expand_path(dir);
        }

        if let Ok(env_dir) = std::env::var("PROMPT_ENGINE_TEMPLATES")
            && !env_dir.is_empty()
        {
            return Self::expand_path(Path::new(&env_dir));
        }

        Self::expand_path(&self.templates_dir)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.templates_dir.ends_with("templates"));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Debug.as_filter(), log::LevelFilter::Debug);
        assert_eq!(LogLevel::Off.as_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "templates_dir: /srv/prompts\nlog_level: debug\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("/srv/prompts"));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "log_level: warn\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.templates_dir.ends_with("templates"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/prompt-engine.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_templates_dir_override_wins() {
        let config = Config {
            templates_dir: PathBuf::from("/from/config"),
            log_level: LogLevel::Info,
        };
        assert_eq!(
            config.templates_dir(Some(Path::new("/from/cli"))),
            PathBuf::from("/from/cli")
        );
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/usr/local/share/prompts");
        assert_eq!(Config::expand_path(&path), path);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        // SAFETY: Test runs single-threaded, env var is test-specific
        unsafe {
            std::env::set_var("PROMPT_ENGINE_TEST_VAR", "/custom/path");
        }
        let path = PathBuf::from("$PROMPT_ENGINE_TEST_VAR/templates");
        assert_eq!(Config::expand_path(&path), PathBuf::from("/custom/path/templates"));
        unsafe {
            std::env::remove_var("PROMPT_ENGINE_TEST_VAR");
        }
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml_str = serde_yaml::to_string(&config).expect("Failed to serialize");
        let parsed: Config = serde_yaml::from_str(&yaml_str).expect("Failed to deserialize");
        assert_eq!(parsed.templates_dir, config.templates_dir);
        assert_eq!(parsed.log_level, config.log_level);
    }
}

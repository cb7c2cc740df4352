use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::completion::FileStore;
use crate::content::ContentSource;
use crate::search::DEFAULT_MAX_RESULTS;
use crate::view::{RenderOptions, DEFAULT_INTRO_MAX_LENGTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub content: ContentConfig,
    pub search: SearchConfig,
    pub paths: PathsConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Path or http(s) URL of the content document
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of hits shown for a query (default: 25)
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding completion storage and logs
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    /// Topic intros longer than this are shortened on cards (default: 110)
    #[serde(default = "default_intro_max_length")]
    pub intro_max_length: usize,
}

fn default_intro_max_length() -> usize {
    DEFAULT_INTRO_MAX_LENGTH
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Path to the project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".helpcenter/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so helpcenter works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/helpcenter/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("helpcenter").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with HELPCENTER_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("HELPCENTER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to .helpcenter/config.toml
    pub fn save(&self) -> Result<()> {
        let config_path = Self::local_config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(&config_path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    pub fn content_source(&self) -> ContentSource {
        ContentSource::parse(&self.content.source)
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    /// Get path to the completion storage file
    pub fn storage_path(&self) -> PathBuf {
        self.state_path().join("storage.json")
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.storage_path())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            intro_max_length: self.ui.intro_max_length,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: ContentConfig {
                source: "data/hilfecenter.json".to_string(),
            },
            search: SearchConfig {
                max_results: DEFAULT_MAX_RESULTS,
            },
            paths: PathsConfig {
                state: ".helpcenter".to_string(), // Relative to cwd
            },
            ui: UiConfig {
                refresh_rate_ms: 250,
                intro_max_length: DEFAULT_INTRO_MAX_LENGTH,
            },
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.max_results, 25);
        assert_eq!(config.ui.intro_max_length, 110);
        assert_eq!(
            config.content_source(),
            ContentSource::File(PathBuf::from("data/hilfecenter.json"))
        );
    }

    #[test]
    fn test_storage_and_logs_under_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();

        assert_eq!(config.storage_path(), temp_dir.path().join("storage.json"));
        assert!(config.logs_path().starts_with(temp_dir.path()));
        assert!(config.logs_path().ends_with("logs"));
    }

    #[test]
    fn test_relative_state_path_is_absolutized() {
        let config = Config::default();
        assert!(config.state_path().is_absolute());
        assert!(config.state_path().ends_with(".helpcenter"));
    }

    #[test]
    fn test_load_with_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[content]\nsource = \"https://example.com/help.json\"\n\n[search]\nmax_results = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(
            config.content_source(),
            ContentSource::Url("https://example.com/help.json".to_string())
        );
        // Untouched sections keep their defaults
        assert_eq!(config.ui.refresh_rate_ms, 250);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.content.source, config.content.source);
        assert_eq!(parsed.logging.level, "info");
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// How long the typing indicator leads a persona reveal
pub const TYPING_LEAD_MS: u64 = 500;

/// Delay between the last reveal and the quick actions unlocking
pub const UNLOCK_GRACE_MS: u64 = 500;

/// Simulated fetch latency for panel content
pub const PANEL_LOAD_MS: u64 = 600;

/// What happens when the visitor re-enters a panel that already loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Run the loader on every entry (loading state flickers on repeat visits)
    #[default]
    EveryEntry,
    /// Load once per session, repeat visits show cached content
    Once,
}

impl LoadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPolicy::EveryEntry => "every-entry",
            LoadPolicy::Once => "once",
        }
    }
}

impl std::fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timer settings for the reveal sequence and panel loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Typing indicator lead before a persona reveal (ms)
    pub typing_lead_ms: u64,
    /// Grace delay after the final reveal before quick actions unlock (ms)
    pub unlock_grace_ms: u64,
    /// Simulated panel load latency (ms)
    pub panel_load_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { typing_lead_ms: TYPING_LEAD_MS, unlock_grace_ms: UNLOCK_GRACE_MS, panel_load_ms: PANEL_LOAD_MS }
    }
}

impl TimingConfig {
    pub fn panel_load(&self) -> Duration {
        Duration::from_millis(self.panel_load_ms)
    }
}

/// Panel behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelsConfig {
    /// Reload policy for data-bearing panels
    pub load_policy: LoadPolicy,
}

/// Where portfolio content comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Override file; the embedded content is used when unset
    pub path: Option<PathBuf>,
}

/// File logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLoggingConfig {
    /// Write logs to a daily rolling file
    pub enabled: bool,
    /// Filter level for the file layer
    pub level: String,
    /// Log directory (defaults to `~/.folio/logs`)
    pub directory: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: "debug".to_string(), directory: None }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level
    pub level: String,
    /// Output format for stderr: pretty, json, compact
    pub format: String,
    /// File output
    pub file: FileLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "pretty".to_string(), file: FileLoggingConfig::default() }
    }
}

/// Root configuration structure for folio.toml
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub timing: TimingConfig,
    pub panels: PanelsConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| crate::Error::Config(ConfigError::from(e).to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.resolve_relative_paths(path);
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Content paths are relative to the config file, not the working directory
    fn resolve_relative_paths(&mut self, config_path: &Path) {
        if let Some(content_path) = &self.content.path
            && content_path.is_relative()
            && let Some(parent) = config_path.parent()
        {
            self.content.path = Some(parent.join(content_path));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if crate::logging::LogFormat::parse_str(&self.logging.format).is_none() {
            return Err(Error::Config(
                ConfigError::InvalidLogFormat(self.logging.format.clone()).to_string(),
            ));
        }

        if self.timing.typing_lead_ms > 10_000 || self.timing.unlock_grace_ms > 10_000 {
            return Err(Error::Config(
                ConfigError::DelayTooLong("typing_lead_ms/unlock_grace_ms".to_string()).to_string(),
            ));
        }

        if self.timing.panel_load_ms > 10_000 {
            return Err(Error::Config(ConfigError::DelayTooLong("panel_load_ms".to_string()).to_string()));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# folio configuration
# Every section is optional. Delete what you don't need.

[timing]
# How long the typing indicator shows before each persona message (ms)
typing_lead_ms = 500
# Pause after the last message before quick actions appear (ms)
unlock_grace_ms = 500
# Simulated load time for the projects/skills/experience panels (ms)
panel_load_ms = 600

[panels]
# "every-entry" reloads a panel each time it opens, "once" caches it
load_policy = "every-entry"

[content]
# Portfolio content file; the built-in content is used when unset.
# Relative paths resolve against this file's directory.
# path = "portfolio.toml"

[logging]
level = "warn"
# pretty, json or compact
format = "pretty"

[logging.file]
enabled = false
level = "debug"
# directory = "/tmp/folio-logs"
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid log format
    #[error("invalid log format: {0}")]
    InvalidLogFormat(String),

    /// A delay outside the sane range
    #[error("delay too long (max 10000ms): {0}")]
    DelayTooLong(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}

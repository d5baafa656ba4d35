//! Configuration loading and resolution.
//!
//! Settings come from three layers, highest precedence first: command-line
//! overrides, the user config file, built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::shell::{OptionScan, ParseOptions, UnclosedQuote};

/// Env var pointing at an alternate config file.
pub const CONFIG_ENV: &str = "HISTALIAS_CONFIG";

/// Default frequency threshold, in percent of all history commands.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot locate home directory for the default {0} path")]
    NoHome(&'static str),

    #[error("threshold must be a non-negative percentage, got {0}")]
    InvalidThreshold(f64),
}

/// Config file contents.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File locations.
    pub paths: PathsConfig,

    /// Frequency threshold in percent.
    pub threshold: Option<f64>,

    /// Command-line parser settings.
    pub parse: ParseOptions,

    /// Activity log settings.
    pub log: LogConfig,
}

/// File locations. Relative to the home directory when unset; a leading
/// `~/` is expanded.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PathsConfig {
    pub history: Option<PathBuf>,
    pub aliases: Option<PathBuf>,
    pub zshrc: Option<PathBuf>,
}

/// Activity log configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Enable the activity log.
    pub enabled: bool,
    /// Path to the log file.
    pub path: Option<PathBuf>,
}

/// Values given on the command line. `None`/`false` leaves the config value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub history: Option<PathBuf>,
    pub aliases: Option<PathBuf>,
    pub zshrc: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub full_command: bool,
    pub exclude_flags: bool,
    pub option_scan: Option<OptionScan>,
    pub unclosed_quote: Option<UnclosedQuote>,
    pub log: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub history: PathBuf,
    pub aliases: PathBuf,
    pub zshrc: PathBuf,
    pub threshold: f64,
    pub parse: ParseOptions,
    pub log: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl Config {
    /// Load the user config, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get config path.
    /// Respects HISTALIAS_CONFIG for testing.
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("histalias").join("config.toml"))
    }

    /// Apply overrides and fill defaults relative to `home`.
    pub fn resolve(self, overrides: Overrides, home: Option<&Path>) -> Result<Settings, ConfigError> {
        let history = resolve_path(overrides.history, self.paths.history, ".zsh_history", "history", home)?;
        let aliases = resolve_path(overrides.aliases, self.paths.aliases, ".zsh_aliases", "aliases", home)?;
        let zshrc = resolve_path(overrides.zshrc, self.paths.zshrc, ".zshrc", "zshrc", home)?;

        let threshold = overrides
            .threshold
            .or(self.threshold)
            .unwrap_or(DEFAULT_THRESHOLD);
        if !(threshold >= 0.0 && threshold.is_finite()) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        let mut parse = self.parse;
        if overrides.full_command {
            parse.full_command = true;
        }
        if overrides.exclude_flags {
            parse.include_flags = false;
        }
        if let Some(scan) = overrides.option_scan {
            parse.option_scan = scan;
        }
        if let Some(policy) = overrides.unclosed_quote {
            parse.unclosed_quote = policy;
        }

        let log = match overrides.log {
            Some(path) => Some(path),
            None if self.log.enabled => self.log.path.map(|p| expand_home(p, home)),
            None => None,
        };

        Ok(Settings {
            history,
            aliases,
            zshrc,
            threshold,
            parse,
            log,
            home: home.map(Path::to_path_buf),
        })
    }
}

fn resolve_path(
    cli: Option<PathBuf>,
    file: Option<PathBuf>,
    default_name: &str,
    what: &'static str,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = cli {
        return Ok(path);
    }
    if let Some(path) = file {
        return Ok(expand_home(path, home));
    }
    home.map(|h| h.join(default_name))
        .ok_or(ConfigError::NoHome(what))
}

/// Expand a leading `~/` against `home`.
fn expand_home(path: PathBuf, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path,
    }
}

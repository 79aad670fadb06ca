//! golfcal configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file (`~/.config/golfcal/config.toml` unless another path is given), then
//! `GOLFCAL_*` environment variables (`GOLFCAL_SOURCE__URL` for nested keys).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::assemble::FeedPolicy;
use crate::constants::{DEFAULT_PRUNE_DAYS, DEFAULT_REMINDER_DAYS};
use crate::error::{GolfCalError, GolfCalResult};
use crate::source::DEFAULT_TRACKED_EVENTS;

static DEFAULT_OUTPUT_PATH: &str = "golf.ics";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the feed is written
    pub output_path: PathBuf,

    /// Days an event stays in the feed after its last round
    pub prune_days: u64,

    /// Days before the first round the reminder fires
    pub reminder_days: u32,

    /// Replaces the built-in tournament catalog when set
    pub catalog_path: Option<PathBuf>,

    pub source: SourceSettings,
}

/// External schedule settings. The source is skipped when `url` is unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// JSON schedule endpoint; `{tour}` is replaced with `tour`
    pub url: Option<String>,

    pub tour: String,

    /// Request timeout in humantime form, e.g. "10s"
    pub timeout: String,

    /// Only events whose name contains one of these are kept
    pub tracked_events: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            prune_days: DEFAULT_PRUNE_DAYS,
            reminder_days: DEFAULT_REMINDER_DAYS,
            catalog_path: None,
            source: SourceSettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            url: None,
            tour: "eur".to_string(),
            timeout: "10s".to_string(),
            tracked_events: DEFAULT_TRACKED_EVENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn config_path() -> GolfCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GolfCalError::Config("Could not determine config directory".into()))?
            .join("golfcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings. An explicit `path` must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> GolfCalResult<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix("GOLFCAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GolfCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GolfCalError::Config(e.to_string()))?;

        settings.source.timeout()?;
        Ok(settings)
    }

    /// Parse settings from TOML text alone, without file or environment lookup.
    pub fn from_toml(content: &str) -> GolfCalResult<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| GolfCalError::Config(e.to_string()))?;
        settings.source.timeout()?;
        Ok(settings)
    }

    /// Output path with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_path)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path.as_deref().map(expand_tilde)
    }

    pub fn feed_policy(&self) -> FeedPolicy {
        FeedPolicy {
            prune_days: self.prune_days,
            reminder_days: self.reminder_days,
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> GolfCalResult<Duration> {
        humantime::parse_duration(&self.timeout).map_err(|e| {
            GolfCalError::Config(format!("Invalid source timeout '{}': {}", self.timeout, e))
        })
    }

    /// The schedule URL template, if a source is configured.
    pub fn url_template(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

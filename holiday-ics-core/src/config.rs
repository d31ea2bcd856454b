//! Configuration for holiday-ics.
//!
//! Every field has a default, so running without a config file produces the
//! stock calendar. A config file (TOML) only needs the keys it changes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{HolidayIcsError, HolidayIcsResult};
use crate::event::DEFAULT_UID_DOMAIN;
use crate::festival::LunarFestival;
use crate::ics::CalendarMetadata;
use crate::years::YearPolicy;

/// Primary feed and its raw GitHub mirror, tried in this order.
pub const DEFAULT_SOURCES: [&str; 2] = [
    "https://natescarlet.github.io/holiday-cn/release/{year}.json",
    "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/{year}.json",
];

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

static DEFAULT_OUTPUT: &str = "calendar.ics";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    pub years: YearPolicy,

    /// Source URL templates; `{year}` is replaced with the year being fetched.
    pub sources: Vec<String>,

    pub timeout_secs: u64,

    /// Output file, relative to the working directory unless absolute.
    /// A leading `~` is expanded.
    pub output: PathBuf,

    pub uid_domain: String,

    pub calendar: CalendarMetadata,

    pub labels: Labels,

    /// Fixed Gregorian festivals keyed by `MM-DD`.
    pub festivals: BTreeMap<String, String>,

    pub lunar_festivals: Vec<LunarFestival>,
}

/// Summaries used for events built from the holiday feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub off_day: String,
    pub workday: String,
    /// Append the feed's holiday name, e.g. `🔴 休假 (国庆节)`.
    pub append_holiday_name: bool,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            off_day: "🔴 休假".to_string(),
            workday: "⚫ 補班".to_string(),
            append_holiday_name: false,
        }
    }
}

impl Default for HolidayConfig {
    fn default() -> Self {
        HolidayConfig {
            years: YearPolicy::default(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            calendar: CalendarMetadata::default(),
            labels: Labels::default(),
            festivals: BTreeMap::from([
                ("02-14".to_string(), "💖 情人節".to_string()),
                ("12-25".to_string(), "🎄 聖誕節".to_string()),
            ]),
            lunar_festivals: vec![LunarFestival {
                month: 7,
                day: 7,
                leap: false,
                label: "🎋 七夕".to_string(),
            }],
        }
    }
}

impl HolidayConfig {
    /// `<config_dir>/holiday-ics/config.toml`
    pub fn default_path() -> HolidayIcsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HolidayIcsError::Config("Could not determine config directory".into()))?
            .join("holiday-ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// if present and the built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> HolidayIcsResult<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path()?, false),
        };

        let config: HolidayConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .build()
            .map_err(|e| HolidayIcsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HolidayIcsError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> HolidayIcsResult<Self> {
        let config: HolidayConfig = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .map_err(|e| HolidayIcsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HolidayIcsError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> HolidayIcsResult<String> {
        toml::to_string_pretty(self).map_err(|e| HolidayIcsError::Config(e.to_string()))
    }

    pub fn validate(&self) -> HolidayIcsResult<()> {
        if self.sources.is_empty() {
            return Err(HolidayIcsError::Config(
                "At least one holiday source URL is required".into(),
            ));
        }
        if let Some(source) = self.sources.iter().find(|s| !s.contains("{year}")) {
            return Err(HolidayIcsError::Config(format!(
                "Source URL '{source}' has no {{year}} placeholder"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(HolidayIcsError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(HolidayIcsError::Config("output path is empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Output path with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.output.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }
}

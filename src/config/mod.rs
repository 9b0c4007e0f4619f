//! Client configuration
//!
//! Defaults are compiled in from `studyroom.toml`. Native builds (tests, tools)
//! can layer a config file and `STUDYROOM_*` environment variables on top.

use anyhow::{ensure, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use studyroom_types::DepartmentId;

/// Built-in defaults
const DEFAULT_CONFIG: &str = include_str!("../../studyroom.toml");

/// Environment variable naming an override file (native only)
pub const CONFIG_PATH_ENV: &str = "STUDYROOM_CONFIG";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_department_id")]
    pub department_id: DepartmentId,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_verification_timer_secs")]
    pub verification_timer_secs: u32,

    #[serde(default = "default_otp_refresh_secs")]
    pub otp_refresh_secs: u32,

    #[serde(default)]
    pub notices: NoticeConfig,

    #[serde(default)]
    pub time_table: TimeTableConfig,
}

fn default_api_base_url() -> String {
    "https://api.studyroom.computer.hufs.ac.kr".to_string()
}

fn default_department_id() -> DepartmentId {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_verification_timer_secs() -> u32 {
    300
}

fn default_otp_refresh_secs() -> u32 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            department_id: default_department_id(),
            log_level: default_log_level(),
            verification_timer_secs: default_verification_timer_secs(),
            otp_refresh_secs: default_otp_refresh_secs(),
            notices: NoticeConfig::default(),
            time_table: TimeTableConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Log level, falling back to INFO for unrecognised values
    pub fn level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Reject configurations the time table cannot be built from
    pub fn validate(&self) -> Result<()> {
        let tt = &self.time_table;
        ensure!(tt.interval_minutes > 0, "time_table.interval_minutes must be positive");
        ensure!(tt.start < tt.end, "time_table.start must be before time_table.end");
        ensure!(
            tt.max_reservation_slots >= 1,
            "time_table.max_reservation_slots must be at least 1"
        );
        ensure!(!self.api_base_url.trim().is_empty(), "api_base_url must be set");
        Ok(())
    }
}

/// Auto-dismiss delays for transient notifications
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NoticeConfig {
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
    /// Shorter delay used for quick input errors
    #[serde(default = "default_brief_notice_ms")]
    pub brief_notice_ms: u64,
}

fn default_notice_ms() -> u64 {
    5000
}

fn default_brief_notice_ms() -> u64 {
    2500
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            notice_ms: default_notice_ms(),
            brief_notice_ms: default_brief_notice_ms(),
        }
    }
}

/// Daily operating window and reservation length limit
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TimeTableConfig {
    #[serde(default = "default_start", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(default = "default_end", with = "hhmm")]
    pub end: NaiveTime,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
    #[serde(default = "default_max_reservation_slots")]
    pub max_reservation_slots: usize,
}

fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 30, 0).unwrap_or_default()
}

fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 30, 0).unwrap_or_default()
}

fn default_interval_minutes() -> u32 {
    30
}

fn default_max_reservation_slots() -> usize {
    4
}

impl Default for TimeTableConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            interval_minutes: default_interval_minutes(),
            max_reservation_slots: default_max_reservation_slots(),
        }
    }
}

/// `HH:MM` (de)serialization for wall-clock times
mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(d)?;
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid time '{}': {}", s, e)))
    }
}

fn builder() -> ::config::ConfigBuilder<::config::builder::DefaultState> {
    ::config::Config::builder().add_source(::config::File::from_str(
        DEFAULT_CONFIG,
        ::config::FileFormat::Toml,
    ))
}

/// Load the configuration for the running target.
///
/// In the browser only the built-in defaults apply.
pub fn load_config() -> Result<ClientConfig> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = std::env::var(CONFIG_PATH_ENV).ok().map(std::path::PathBuf::from);
        load_config_from(path.as_deref())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let config: ClientConfig = builder().build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Load defaults, then an optional file, then `STUDYROOM_*` environment overrides
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config_from(path: Option<&std::path::Path>) -> Result<ClientConfig> {
    let mut builder = builder();

    if let Some(path) = path {
        builder = builder.add_source(::config::File::from(path).required(true));
    }

    let config: ClientConfig = builder
        // Override with environment variables (STUDYROOM_DEPARTMENT_ID, STUDYROOM_TIME_TABLE__START, etc.)
        .add_source(
            ::config::Environment::with_prefix("STUDYROOM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_embedded_defaults_match_code_defaults() {
        let config = load_config_from(None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.time_table.max_reservation_slots, 4);
        assert_eq!(config.level(), tracing::Level::INFO);
    }

    #[test]
    #[serial]
    fn test_env_overrides_nested_keys() {
        std::env::set_var("STUDYROOM_DEPARTMENT_ID", "7");
        std::env::set_var("STUDYROOM_TIME_TABLE__INTERVAL_MINUTES", "60");
        let config = load_config_from(None);
        std::env::remove_var("STUDYROOM_DEPARTMENT_ID");
        std::env::remove_var("STUDYROOM_TIME_TABLE__INTERVAL_MINUTES");

        let config = config.unwrap();
        assert_eq!(config.department_id, 7);
        assert_eq!(config.time_table.interval_minutes, 60);
    }

    #[test]
    #[serial]
    fn test_file_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"debug\"\n[time_table]\nstart = \"09:00\"").unwrap();

        let config = load_config_from(Some(file.path())).unwrap();
        assert_eq!(config.level(), tracing::Level::DEBUG);
        assert_eq!(
            config.time_table.start,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        // Untouched keys keep their defaults
        assert_eq!(config.time_table.interval_minutes, 30);
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut config = ClientConfig::default();
        config.time_table.start = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.time_table.max_reservation_slots = 0;
        assert!(config.validate().is_err());
    }
}

//! Configuration layer: typed settings with layered precedence (file → env).

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::infra::error::InfraError;

const LOCAL_CONFIG_BASENAME: &str = "riverbed";
const ENV_PREFIX: &str = "RIVERBED";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/riverbed";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_CACHE_VERSION: &str = "v2";
const DEFAULT_ARRANGEMENT_PREFIX: &str = "si";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub documents: DocumentSettings,
    #[serde(default)]
    pub arrangement: ArrangementSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl LoggingSettings {
    pub fn level_filter(&self) -> LevelFilter {
        match self.level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Document store settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentSettings {
    /// Cache-format version tag folded into every derived key.
    #[serde(default = "default_cache_version")]
    pub version: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            version: default_cache_version(),
        }
    }
}

/// Arrangement settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrangementSettings {
    /// Site prefix carried by stored marquee-layout field values.
    #[serde(default = "default_arrangement_prefix")]
    pub prefix: String,
}

impl Default for ArrangementSettings {
    fn default() -> Self {
        Self {
            prefix: default_arrangement_prefix(),
        }
    }
}

/// Load settings from an optional explicit file, a `riverbed.toml` in the
/// working directory, and `RIVERBED_*` environment variables, later sources
/// overriding earlier ones.
pub fn load(explicit_file: Option<&Path>) -> Result<Settings, InfraError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = explicit_file {
        builder = builder.add_source(File::from(path));
    }

    builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|err| InfraError::configuration(err.to_string()))
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    DEFAULT_DB_MAX_CONNECTIONS
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

fn default_cache_version() -> String {
    DEFAULT_CACHE_VERSION.to_string()
}

fn default_arrangement_prefix() -> String {
    DEFAULT_ARRANGEMENT_PREFIX.to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_apply_without_any_source() {
        let settings = Settings::default();
        assert_eq!(settings.documents.version, "v2");
        assert_eq!(settings.database.max_connections, 8);
        assert_eq!(settings.logging.level, LogLevel::Info);
        assert_eq!(settings.arrangement.prefix, "si");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config file");
        writeln!(
            file,
            "[documents]\nversion = \"v3\"\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n"
        )
        .expect("write config");

        let settings = load(Some(file.path())).expect("settings load");
        assert_eq!(settings.documents.version, "v3");
        assert_eq!(settings.logging.level, LogLevel::Debug);
        assert_eq!(settings.logging.format, LogFormat::Json);
        // Untouched sections keep their defaults.
        assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config file");
        writeln!(file, "[documents]\nversino = \"v3\"\n").expect("write config");

        assert!(load(Some(file.path())).is_err());
    }
}

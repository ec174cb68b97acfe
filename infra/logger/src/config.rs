use crate::error::LoggerError;
use crate::output::{DEFAULT_MAX_FILES, FileOutput};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

/// File rotation period, as written in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Self::MINUTELY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}

/// Logger settings loaded from configuration.
///
/// `rotation`, `max_files` and `json` only apply when `path` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive: `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files. No file output when absent.
    pub path: Option<PathBuf>,
    /// Write file output as JSON lines.
    pub json: bool,
    pub env_filter: Option<String>,
    pub max_files: usize,
    pub rotation: RotationPolicy,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            env_filter: None,
            max_files: DEFAULT_MAX_FILES,
            rotation: RotationPolicy::Daily,
        }
    }
}

/// What gets installed: the resolved form of a [`LoggingConfig`] or of the builder calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) level: LevelFilter,
    pub(crate) console: bool,
    pub(crate) env_filter: Option<String>,
    pub(crate) file: Option<FileOutput>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { level: LevelFilter::INFO, console: true, env_filter: None, file: None }
    }
}

impl TryFrom<&LoggingConfig> for Settings {
    type Error = LoggerError;

    fn try_from(config: &LoggingConfig) -> Result<Self, Self::Error> {
        let level = config.level.parse::<LevelFilter>().map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid level '{}': {e}", config.level).into(),
                context: Some("Reading logging configuration".into()),
            }
        })?;

        let file = config.path.as_ref().map(|dir| {
            FileOutput::new(dir.clone())
                .rotation(config.rotation.into())
                .max_files(config.max_files)
                .json(config.json)
        });

        Ok(Self { level, console: config.console, env_filter: config.env_filter.clone(), file })
    }
}

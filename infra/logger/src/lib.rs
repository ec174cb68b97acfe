//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for applications built on
//! the common crates: a compact console layer, an optional rolling file layer
//! behind a non-blocking writer, and an [`EnvFilter`] on top.
//!
//! Settings come either from a [`LoggingConfig`] section
//! ([`Logger::from_config`]) or from [`Logger::builder`]. Both resolve to the
//! same settings and are validated before anything is installed.
//!
//! ```rust
//! use sn_logger::{FileOutput, LevelFilter, Logger};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let _logger = Logger::builder()
//!     .name("collector")
//!     .level(LevelFilter::DEBUG)
//!     .env_filter("sn_service=trace")
//!     .file(FileOutput::new(dir.path()).max_files(3))
//!     .init()
//!     .unwrap();
//! ```

mod config;
mod error;
mod output;

pub use crate::config::{LoggingConfig, RotationPolicy};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::output::FileOutput;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use crate::config::Settings;
use crate::output::{console_layer, file_layer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builder state before [`LoggerBuilder::name`].
#[derive(Debug)]
pub struct Unnamed;

/// Builder state once a name is set; only this state can [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct Named(String);

/// Configures the global subscriber in code.
///
/// The name prefixes log file names and is required before `init`.
#[derive(Debug)]
#[must_use = "The builder does nothing until `init` is called"]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    settings: Settings,
}

impl LoggerBuilder<Unnamed> {
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        LoggerBuilder { name: Named(name.into()), settings: self.settings }
    }
}

impl<N> LoggerBuilder<N> {
    /// Default level for targets the env filter does not mention.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Directives such as `sn_service=debug,sn_json=info`.
    ///
    /// Replaces `RUST_LOG`, which is read only when no directives are given.
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.env_filter = Some(directives.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    pub fn file(mut self, output: FileOutput) -> Self {
        self.settings.file = Some(output);
        self
    }
}

impl LoggerBuilder<Named> {
    /// Validates the settings and installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: dropping it stops the file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name, zero `max_files`,
    ///   bad env filter directives, or when neither console nor file output is on.
    /// * [`LoggerError::Io`] or [`LoggerError::Appender`] when the log directory
    ///   or file cannot be opened.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        install(&self.name.0, &self.settings)
    }
}

/// Handle to the installed subscriber.
///
/// Holds the file writer's [`WorkerGuard`]; buffered lines are written when it drops.
#[must_use = "Dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: Unnamed, settings: Settings::default() }
    }

    /// Installs the global subscriber described by a configuration section.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an unknown `level`, otherwise as
    /// [`LoggerBuilder::init`].
    pub fn from_config(
        name: impl Into<String>,
        config: &LoggingConfig,
    ) -> Result<Self, LoggerError> {
        let settings = Settings::try_from(config)?;
        install(&name.into(), &settings)
    }

    /// Marks a synchronization point before shutdown.
    ///
    /// Buffered lines are written when this handle is dropped.
    pub fn flush(&self) {
        tracing::debug!(file = self.guard.is_some(), "Logger flushed");
    }

    /// The file writer's guard, if file output is on.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging shutting down, flushing file output");
        }
    }
}

fn install(name: &str, settings: &Settings) -> Result<Logger, LoggerError> {
    validate(name, settings)?;
    let filter = env_filter(settings)?;

    let mut layers = Vec::new();
    if settings.console {
        layers.push(console_layer());
    }
    let guard = match &settings.file {
        Some(file) => {
            let (layer, guard) = file_layer(name, file)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(filter).with(layers).try_init()?;

    tracing::debug!(
        logger = name,
        level = %settings.level,
        console = settings.console,
        dir = ?settings.file.as_ref().map(FileOutput::dir),
        "Logging initialized"
    );
    Ok(Logger { guard })
}

fn validate(name: &str, settings: &Settings) -> Result<(), LoggerError> {
    let problem = if name.trim().is_empty() {
        Some("Logger name cannot be empty")
    } else if settings.file.as_ref().is_some_and(|file| file.kept_files() == 0) {
        Some("max_files must be greater than zero")
    } else if !settings.console && settings.file.is_none() {
        Some("No output enabled; turn on the console or a log file")
    } else {
        None
    };

    problem.map_or(Ok(()), |message| {
        Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
    })
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    let Some(directives) = &settings.env_filter else {
        return Ok(builder.from_env_lossy());
    };

    builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid env filter '{directives}': {e}").into(),
        context: None,
    })
}

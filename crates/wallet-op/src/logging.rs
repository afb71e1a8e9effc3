//! Tracing setup for harnesses embedding the library.
//!
//! The library itself only emits `tracing` events. Test suites and tools that want to see them
//! install a subscriber through [`LogConfig::init`]:
//! - verbosity levels from 0 (off) to 5 (trace)
//! - `RUST_LOG` overrides the verbosity when set
//! - output to stderr, or to a file without ANSI colors

use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file could not be created
    #[error("Failed to create log file {path}: {source}")]
    File {
        /// Requested log file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// 0 = off, 1 = error, 2 = warn, 3 = info, 4 = debug, 5+ = trace
    pub verbose: u8,
    /// Write to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Disable colors on stderr
    pub no_color: bool,
}

impl LogConfig {
    /// Creates a stderr configuration with the given verbosity.
    pub fn new(verbose: u8) -> Self {
        Self { verbose, ..Default::default() }
    }

    /// Redirects output to `path`.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Disables ANSI colors.
    pub fn without_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// The level selected by [`Self::verbose`], `None` when logging is off.
    pub const fn level(&self) -> Option<Level> {
        match self.verbose {
            0 => None,
            1 => Some(Level::ERROR),
            2 => Some(Level::WARN),
            3 => Some(Level::INFO),
            4 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }

    /// Filter directive derived from the verbosity alone.
    pub fn directive(&self) -> String {
        match self.level() {
            Some(level) => format!("wallet_op={level}"),
            None => "off".to_string(),
        }
    }

    /// The effective filter: `RUST_LOG` if set, otherwise [`Self::directive`].
    pub fn filter(&self) -> EnvFilter {
        if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.directive())
        }
    }

    /// Installs the global subscriber.
    ///
    /// Targets are shown from debug level on.
    pub fn try_init(&self) -> Result<(), LogError> {
        let show_target = self.verbose >= 4;
        let builder = fmt().with_env_filter(self.filter()).with_target(show_target);

        let result = if let Some(path) = &self.log_file {
            let file = std::fs::File::create(path)
                .map_err(|source| LogError::File { path: path.clone(), source })?;
            builder.with_writer(file).with_ansi(false).try_init()
        } else {
            builder.with_writer(std::io::stderr).with_ansi(!self.no_color).try_init()
        };
        result.map_err(|err| LogError::Init(err.to_string()))
    }

    /// Like [`Self::try_init`], but tolerates an already installed subscriber, which is the
    /// common case when several tests initialize logging.
    pub fn init(&self) -> Result<(), LogError> {
        match self.try_init() {
            Err(LogError::Init(_)) => Ok(()),
            other => other,
        }
    }
}

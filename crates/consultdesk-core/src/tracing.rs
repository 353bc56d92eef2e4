//! Log setup for consultdesk binaries.
//!
//! Library code only emits `tracing` events; a binary installs a subscriber
//! once through [`init_tracing`]. Logs always go to stderr so command output
//! on stdout stays machine-readable.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Target prefix shared by every consultdesk crate.
const TARGET_PREFIX: &str = "consultdesk";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A subscriber is already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Invalid filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, human oriented
    Pretty,
    /// One JSON object per line
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for consultdesk targets when `RUST_LOG` is unset
    pub level: Level,
    pub format: TracingOutputFormat,
    /// Print file and line of each event
    pub with_location: bool,
    /// Explicit filter directive; wins over both `level` and `RUST_LOG`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::cli()
    }
}

impl TracingConfig {
    /// Warnings only, compact.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            level: Level::WARN,
            format: TracingOutputFormat::Compact,
            with_location: false,
            env_filter: None,
        }
    }

    /// Debug level with source locations, for `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            with_location: true,
            ..Self::cli()
        }
    }

    /// JSON lines at info level, for log collection.
    #[must_use]
    pub fn structured() -> Self {
        Self {
            level: Level::INFO,
            format: TracingOutputFormat::Json,
            with_location: true,
            env_filter: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// The directive used when neither an explicit filter nor `RUST_LOG` is set.
    pub fn default_directive(&self) -> String {
        format!("{}={}", TARGET_PREFIX, self.level)
    }

    /// Builds the filter: explicit directive, then `RUST_LOG`, then the level.
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::EnvFilter`] if the explicit directive is invalid.
    pub fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        match self.env_filter {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the filter is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.build_filter()?;
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.with_location)
        .with_line_number(config.with_location);

    match config.format {
        TracingOutputFormat::Compact => {
            let layer = base.compact().without_time().with_target(config.with_location);
            tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(filter).with(layer),
            )?;
        }
        TracingOutputFormat::Pretty => {
            tracing::subscriber::set_global_default(
                tracing_subscriber::registry()
                    .with(filter)
                    .with(base.pretty()),
            )?;
        }
        TracingOutputFormat::Json => {
            tracing::subscriber::set_global_default(
                tracing_subscriber::registry().with(filter).with(base.json()),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_presets() {
        let quiet = TracingConfig::cli();
        assert_eq!(quiet.level, Level::WARN);
        assert_eq!(quiet.format, TracingOutputFormat::Compact);
        assert!(!quiet.with_location);
        assert_eq!(TracingConfig::default(), quiet);

        let debug = TracingConfig::cli_debug();
        assert_eq!(debug.level, Level::DEBUG);
        assert_eq!(debug.format, TracingOutputFormat::Compact);
        assert!(debug.with_location);
    }

    #[test]
    fn structured_preset() {
        let config = TracingConfig::structured();
        assert_eq!(config.format, TracingOutputFormat::Json);
        assert_eq!(config.level, Level::INFO);
    }

    #[test]
    fn default_directive_targets_all_crates() {
        assert_eq!(TracingConfig::cli().default_directive(), "consultdesk=WARN");
        assert_eq!(
            TracingConfig::cli().with_level(Level::TRACE).default_directive(),
            "consultdesk=TRACE"
        );
    }

    #[test]
    fn explicit_filter() {
        let config = TracingConfig::cli()
            .with_format(TracingOutputFormat::Pretty)
            .with_env_filter("consultdesk_store=trace");
        assert_eq!(config.format, TracingOutputFormat::Pretty);
        assert!(config.build_filter().is_ok());

        let bad = TracingConfig::cli().with_env_filter("consultdesk=notalevel");
        assert!(matches!(bad.build_filter(), Err(TracingError::EnvFilter(_))));
    }
}

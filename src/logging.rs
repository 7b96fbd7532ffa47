use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level used when `--loglevel` is absent or unparseable.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins over `level` when set. Safe to call more than once; only
/// the first call installs a subscriber.
pub fn init_tracing(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}

/// Parse a `--loglevel` value, falling back to [`DEFAULT_LOG_LEVEL`].
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Logger handle passed to commands.
///
/// Diagnostics go through `tracing`; `msg` is for user-facing output.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Whether messages at `level` pass this logger's threshold.
    pub fn enabled(&self, level: tracing::Level) -> bool {
        level <= self.level
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    /// Print a line for the user on stdout.
    pub fn msg(&self, message: &str) {
        println!("{}", message);
    }
}

//! File-based tracing for the `stashgen` binary
//!
//! Traces go to `stashgen_trace.log` in the system temp directory. The level is held in
//! an atomic so it can be changed after the subscriber is installed.

use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

/// Name of the trace file inside the temp directory
const TRACE_FILE_NAME: &str = "stashgen_trace.log";

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(TracingLevel::Warn.as_u8());

/// Layer that enables events at or above the current dynamic level
#[derive(Clone)]
pub struct DynamicFilter;

impl<S> Layer<S> for DynamicFilter
where
    S: Subscriber,
{
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        TracingLevel::from(*metadata.level()).as_u8() <= CURRENT_LEVEL.load(Ordering::Relaxed)
    }
}

/// Tracing levels selectable with `--log-level`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingLevel {
    /// Failures only
    Error,
    /// Diagnostics and failures
    #[default]
    Warn,
    /// One line per artifact and per round
    Info,
    /// Cache hits and classification decisions
    Debug,
    /// Everything
    Trace,
}

impl From<Level> for TracingLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        }
    }
}

impl FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "Invalid tracing level '{s}'. Valid levels are: error, warn, info, debug, trace"
            )),
        }
    }
}

impl TracingLevel {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }

    /// Lowercase name as accepted by `--log-level`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Install the file subscriber
///
/// Returns a `WorkerGuard` that must be kept alive for buffered events to reach the file.
pub fn init_file_tracing() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), TRACE_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    Registry::default().with(DynamicFilter).with(file_layer).init();

    guard
}

/// Set the current tracing level
pub fn set_tracing_level(level: TracingLevel) {
    CURRENT_LEVEL.store(level.as_u8(), Ordering::Relaxed);
    tracing::info!("Tracing level set to: {}", level.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_level_from_str() {
        assert_eq!(TracingLevel::from_str("error"), Ok(TracingLevel::Error));
        assert_eq!(TracingLevel::from_str("WARN"), Ok(TracingLevel::Warn));
        assert_eq!(TracingLevel::from_str("Debug"), Ok(TracingLevel::Debug));
        assert!(TracingLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_levels_are_ordered_by_verbosity() {
        assert!(TracingLevel::from(Level::ERROR).as_u8() < TracingLevel::from(Level::TRACE).as_u8());
        assert_eq!(TracingLevel::default(), TracingLevel::Warn);
    }

    #[test]
    fn test_set_tracing_level_updates_filter_level() {
        set_tracing_level(TracingLevel::Debug);
        assert_eq!(CURRENT_LEVEL.load(Ordering::Relaxed), TracingLevel::Debug.as_u8());
        set_tracing_level(TracingLevel::Warn);
        assert_eq!(CURRENT_LEVEL.load(Ordering::Relaxed), TracingLevel::Warn.as_u8());
    }
}

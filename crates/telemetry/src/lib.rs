//! Logging, trace ids and timing metrics for PhotoSpot
//!
//! - [`init`] installs the global `tracing` subscriber from [`LogSettings`]
//! - [`new_trace_id`] mints the opaque id handed to clients on internal errors
//! - [`Timer`] records operation latency through the `metrics` facade

use once_cell::sync::Lazy;
use photospot_core::config::{LogFormat, LogSettings};
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Histogram receiving every [`Timer`] sample, labelled by `operation`.
pub const OPERATION_DURATION_MS: &str = "photospot_operation_duration_ms";

/// File name prefix of the rolling log.
const LOG_FILE_PREFIX: &str = "photospot.log";

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install the global subscriber.
///
/// Console output goes to stderr in the configured format. When
/// `settings.directory` is set, JSON lines are also written to a daily
/// rolling file; keep the returned guard alive until exit so buffered lines
/// are flushed. `RUST_LOG` overrides `settings.level` when present.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(settings: &LogSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    let installed = match settings.format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    tracing::info!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(guard)
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// A fresh opaque id for correlating one failure across logs and responses.
#[must_use]
pub fn new_trace_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Timer for measuring operation duration
///
/// The sample is recorded once, on [`Timer::stop`] or on drop.
pub struct Timer {
    operation: &'static str,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start a new timer
    #[must_use]
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        let duration = self.start.elapsed();
        self.record(duration);
        duration
    }

    fn record(&mut self, duration: Duration) {
        self.recorded = true;
        metrics::histogram!(OPERATION_DURATION_MS, "operation" => self.operation)
            .record(duration.as_secs_f64() * 1000.0);
        tracing::debug!(
            operation = self.operation,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.recorded {
            let duration = self.start.elapsed();
            self.record(duration);
        }
    }
}

/// Enter an info span and time it until the end of the enclosing scope.
#[macro_export]
macro_rules! timed_span {
    ($name:expr) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name).entered();
    };
    ($name:expr, $($field:tt)*) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name, $($field)*).entered();
    };
}

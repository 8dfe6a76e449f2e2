//! Span and timing helpers.

use std::path::Path;
use std::time::{Duration, Instant};
use tracing::field::Empty;
use tracing::{info_span, Span};

/// Create a span for an operation on one catalog file.
pub fn catalog_span(operation: &str, path: &Path) -> Span {
    info_span!("catalog", op = %operation, path = %path.display(), error = Empty)
}

/// Create a span for an operation on one locale.
pub fn locale_span(operation: &str, locale: &str) -> Span {
    info_span!("locale", op = %operation, locale = %locale, error = Empty)
}

/// Record an error on the current span.
///
/// Only spans declaring an `error` field keep it.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Log the elapsed time at debug level and return it.
    pub fn finish(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
        duration
    }
}

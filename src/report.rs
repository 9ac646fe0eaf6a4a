// Error reporting collaborator
use crate::error::SourceError;
use std::sync::{Arc, Mutex};

/// Receives non-fatal failures the store recovers from locally.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &str, error: &SourceError);
}

/// Default reporter: forwards to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, context: &str, error: &SourceError) {
        tracing::warn!(context, %error, "finder operation failed");
    }
}

/// Keeps every report in memory. Handy for hosts that batch telemetry.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<(String, SourceError)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, SourceError)> {
        match self.reports.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: &str, error: &SourceError) {
        tracing::warn!(context, %error, "finder operation failed");
        let mut guard = match self.reports.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((context.to_string(), error.clone()));
    }
}

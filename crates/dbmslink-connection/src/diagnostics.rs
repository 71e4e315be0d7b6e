//! Diagnostics sink for problems found while resolving credentials
//!
//! The resolver reports recoverable failures through an injected
//! [`DiagnosticsSink`] instead of a process-wide logger. [`TracingSink`]
//! forwards records to `tracing`; [`CollectingSink`] keeps them in memory so
//! callers can surface them in a UI.

use parking_lot::Mutex;

/// Receives error-level diagnostic records
pub trait DiagnosticsSink: Send + Sync {
    /// Record an error with its underlying cause
    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static));
}

/// Forwards diagnostics to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        tracing::error!(error = %cause, "{}", message);
    }
}

/// A diagnostic record captured by [`CollectingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub cause: String,
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records collected so far
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Remove and return every collected record
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl DiagnosticsSink for CollectingSink {
    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.records.lock().push(Diagnostic {
            message: message.to_string(),
            cause: cause.to_string(),
        });
    }
}

use std::{
    error::Error,
    fmt,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::{error, warn};

/// Sink for data-quality diagnostics raised while importing.
///
/// The accumulated counts decide, after the fact, whether a run was clean.
/// Implementations are injected rather than global so concurrent runs and
/// tests keep separate counts.
pub trait Diagnostics: Send + Sync + fmt::Debug {
    fn log_error(&self, message: &str, cause: Option<&dyn Error>);
    fn log_warning(&self, message: &str, cause: Option<&dyn Error>);
    fn error_count(&self) -> u64;
    fn warning_count(&self) -> u64;
    /// Reset both counters.
    fn clear(&self);
}

pub type SharedDiagnostics = Arc<dyn Diagnostics>;

/// Production diagnostics: forwards to `tracing` and counts.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
    errors: AtomicU64,
    warnings: AtomicU64,
}

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedDiagnostics {
        Arc::new(Self::new())
    }
}

impl Diagnostics for TracingDiagnostics {
    fn log_error(&self, message: &str, cause: Option<&dyn Error>) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        match cause {
            Some(cause) => error!(cause = %cause, "{message}"),
            None => error!("{message}"),
        }
    }

    fn log_warning(&self, message: &str, cause: Option<&dyn Error>) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        match cause {
            Some(cause) => warn!(cause = %cause, "{message}"),
            None => warn!("{message}"),
        }
    }

    fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    fn warning_count(&self) -> u64 {
        self.warnings.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub cause: Option<String>,
}

/// Records every diagnostic in memory. Used by tests to assert on the exact
/// messages a pipeline step produced.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }

    fn push(&self, severity: Severity, message: &str, cause: Option<&dyn Error>) {
        self.lock().push(Diagnostic {
            severity,
            message: message.to_string(),
            cause: cause.map(|c| c.to_string()),
        });
    }

    fn count(&self, severity: Severity) -> u64 {
        self.lock().iter().filter(|d| d.severity == severity).count() as u64
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn log_error(&self, message: &str, cause: Option<&dyn Error>) {
        self.push(Severity::Error, message, cause);
    }

    fn log_warning(&self, message: &str, cause: Option<&dyn Error>) {
        self.push(Severity::Warning, message, cause);
    }

    fn error_count(&self) -> u64 {
        self.count(Severity::Error)
    }

    fn warning_count(&self) -> u64 {
        self.count(Severity::Warning)
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

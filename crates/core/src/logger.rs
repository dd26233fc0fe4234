//! Diagnostic sinks and the per-parse logger.

use std::sync::{Arc, Mutex};

use crate::source::Source;
use crate::{Diagnostic, ParseOptions, Severity, SourceLocation, SpudTextError};

/// A function receiving diagnostics of one severity.
pub trait DiagnosticCallback: Send + Sync {
    /// Handle one diagnostic.
    fn call(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticCallback for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn call(&self, diagnostic: &Diagnostic) {
        (self)(diagnostic)
    }
}

/// Shared handle to a callback, as stored in [`ParseOptions`].
pub type Callback = Arc<dyn DiagnosticCallback>;

/// Receiver for all three severities.
///
/// Every method forwards to the `log` facade unless overridden.
pub trait DiagnosticSink: Send + Sync {
    /// Informational message.
    fn verbose(&self, diagnostic: &Diagnostic) {
        log::debug!("{}", LogLine(diagnostic));
    }

    /// Recoverable problem.
    fn warn(&self, diagnostic: &Diagnostic) {
        log::warn!("{}", LogLine(diagnostic));
    }

    /// Fatal problem.
    fn error(&self, diagnostic: &Diagnostic) {
        log::error!("{}", LogLine(diagnostic));
    }
}

/// Sink that forwards everything to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {}

struct LogLine<'a>(&'a Diagnostic);

impl std::fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0.location {
            Some(location) => write!(f, "{}: {}", location, self.0.message),
            None => f.write_str(&self.0.message),
        }
    }
}

/// Sink that keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, diagnostic: &Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }

    /// Every diagnostic recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Recorded diagnostics of `severity`.
    pub fn with_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .collect()
    }

    /// Recorded warnings.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Recorded errors.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.with_severity(Severity::Error)
    }

    /// Drain the recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .diagnostics
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl DiagnosticSink for RecordingSink {
    fn verbose(&self, diagnostic: &Diagnostic) {
        self.record(diagnostic);
    }

    fn warn(&self, diagnostic: &Diagnostic) {
        self.record(diagnostic);
    }

    fn error(&self, diagnostic: &Diagnostic) {
        self.record(diagnostic);
    }
}

/// Dispatches diagnostics for one parse to the configured callbacks.
pub(crate) struct Logger<'a> {
    options: &'a ParseOptions,
    source: &'a Source,
}

impl<'a> Logger<'a> {
    pub(crate) fn new(options: &'a ParseOptions, source: &'a Source) -> Self {
        Self { options, source }
    }

    pub(crate) fn location(&self, offset: usize) -> SourceLocation {
        self.source
            .location(offset, self.options.filepath.as_deref())
    }

    fn emit(&self, severity: Severity, message: String, offset: Option<usize>) {
        let diagnostic = Diagnostic::new(severity, message, offset.map(|o| self.location(o)));
        let callbacks = match severity {
            Severity::Verbose => &self.options.verbose_callbacks,
            Severity::Warning => &self.options.warn_callbacks,
            Severity::Error => &self.options.error_callbacks,
        };
        for callback in callbacks {
            callback.call(&diagnostic);
        }
    }

    pub(crate) fn verbose(&self, message: impl Into<String>, offset: Option<usize>) {
        if self.options.verbose_callbacks.is_empty() {
            return;
        }
        self.emit(Severity::Verbose, message.into(), offset);
    }

    pub(crate) fn warn(&self, message: impl Into<String>, offset: Option<usize>) {
        self.emit(Severity::Warning, message.into(), offset);
    }

    /// Report a fatal error through the error callbacks.
    pub(crate) fn report(&self, error: &SpudTextError) {
        let diagnostic = Diagnostic::from_error(error);
        for callback in &self.options.error_callbacks {
            callback.call(&diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order_and_filters() {
        let sink = RecordingSink::new();
        sink.warn(&Diagnostic::new(Severity::Warning, "first", None));
        sink.verbose(&Diagnostic::new(Severity::Verbose, "second", None));
        sink.error(&Diagnostic::new(Severity::Error, "third", None));

        let messages: Vec<_> = sink
            .diagnostics()
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(sink.warnings().len(), 1);
        assert_eq!(sink.errors()[0].message, "third");
        assert_eq!(sink.take().len(), 3);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn logger_routes_by_severity_with_location() {
        let sink = Arc::new(RecordingSink::new());
        let options = ParseOptions::silent()
            .with_filepath("page.txt")
            .with_sink(sink.clone());
        let source = Source::new("ab\ncd");
        let logger = Logger::new(&options, &source);

        logger.warn("careful", Some(4));
        logger.verbose("fyi", None);
        logger.report(&SpudTextError::MissingTitle);

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            diagnostics[0].location.as_ref().map(ToString::to_string),
            Some("page.txt:2:2".to_string())
        );
        assert_eq!(diagnostics[1].severity, Severity::Verbose);
        assert_eq!(diagnostics[2].severity, Severity::Error);
    }

    #[test]
    fn closures_are_callbacks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = seen.clone();
        let options = ParseOptions::silent().on_warn(move |d: &Diagnostic| {
            store.lock().unwrap().push(d.message.clone());
        });
        let source = Source::new("x");
        Logger::new(&options, &source).warn("hello", None);
        assert_eq!(*seen.lock().unwrap(), vec!["hello".to_string()]);
    }
}

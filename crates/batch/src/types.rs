use serde::Serialize;
use spudtext_core::{Diagnostic, SpudText, SpudTextError};

/// A single page to parse.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Page identifier (typically the file path).
    pub id: String,
    /// SpudText source.
    pub source: String,
    /// Path reported in diagnostics; defaults to `id`.
    pub filepath: Option<String>,
}

impl BatchInput {
    /// Input whose diagnostics are reported against `id`.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            filepath: None,
        }
    }
}

/// Outcome for one page.
#[derive(Debug)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Parsed page (present on success).
    pub document: Option<SpudText>,
    /// Every diagnostic raised while parsing, in order.
    pub diagnostics: Vec<Diagnostic>,
    /// Fatal error (present on failure).
    pub error: Option<SpudTextError>,
}

impl BatchResult {
    /// Whether the page parsed.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Counters for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of inputs submitted.
    pub total: usize,
    /// Pages that parsed.
    pub succeeded: usize,
    /// Pages that failed.
    pub failed: usize,
    /// Wall-clock time for the whole batch.
    pub processing_time_ms: f64,
}

/// How to run a batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Thread cap; rayon's global pool is used when unset.
    pub max_threads: Option<usize>,
    /// Keep going after a failed page. When false, pages are parsed one at
    /// a time and the batch stops at the first failure.
    pub continue_on_error: bool,
    /// Also forward diagnostics to the `log` facade.
    pub log_diagnostics: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_threads: None,
            continue_on_error: true,
            log_diagnostics: true,
        }
    }
}

/// All per-page results plus statistics.
#[derive(Debug)]
pub struct BatchProcessingResult {
    /// Results in input order; truncated after the first failure when not
    /// continuing on error.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

impl BatchProcessingResult {
    /// Results whose page failed to parse.
    pub fn failures(&self) -> impl Iterator<Item = &BatchResult> {
        self.results.iter().filter(|result| !result.is_ok())
    }
}

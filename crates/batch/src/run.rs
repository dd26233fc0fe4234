use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use spudtext_core::{LogSink, ParseOptions, RecordingSink, Registries, parse};

use crate::types::{BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats};

/// Parse every input against the same registries.
///
/// Each page gets its own recording sink, so diagnostics never mix between
/// pages. Results keep input order.
pub fn parse_batch(
    inputs: Vec<BatchInput>,
    registries: &Registries<'_>,
    options: &BatchOptions,
) -> BatchProcessingResult {
    let start = Instant::now();

    let pool = options.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .map_err(|err| log::warn!("Falling back to the global thread pool: {err}"))
            .ok()
    });

    let total = inputs.len();
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let filepath = input.filepath.unwrap_or_else(|| input.id.clone());
        let sink = Arc::new(RecordingSink::new());
        let mut parse_options = ParseOptions::silent()
            .with_filepath(filepath)
            .with_sink(sink.clone());
        if options.log_diagnostics {
            parse_options = parse_options.with_sink(Arc::new(LogSink));
        }

        match parse(&input.source, registries, &parse_options) {
            Ok(document) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    document: Some(document),
                    diagnostics: sink.take(),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    document: None,
                    diagnostics: sink.take(),
                    error: Some(err),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if options.continue_on_error {
        match pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        // stopping at the first failure needs a defined order
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let stop = !result.is_ok();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    let stats = BatchStats {
        total,
        succeeded: succeeded.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    log::debug!(
        "Parsed {} of {} pages ({} failed) in {:.3} ms",
        stats.succeeded,
        stats.total,
        stats.failed,
        stats.processing_time_ms
    );
    BatchProcessingResult { results, stats }
}

//! Telemetry & Observability
//!
//! Structured logging for the queue and the demo driver.
//! Features:
//! - Scenario spans with timing and outcome
//! - Configurable log levels via RUST_LOG
//! - Compact stderr output that keeps stdout clean for results

use std::time::Instant;
use tracing::{error, info, info_span, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize global tracing subscriber with configurable output
/// By default, only enables tracing if RUST_LOG is explicitly set
pub fn init_tracing() {
    // Without RUST_LOG nothing is installed and the CLI output stays clean
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize tracing only for debug/verbose mode
pub fn init_tracing_verbose() {
    init_tracing_with_filter("debug")
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    // Skip if already initialized
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr); // Write to stderr, not stdout

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Span for one demo scenario run
pub fn enter_scenario(name: &str, capacity: usize) -> Span {
    info_span!(
        "scenario",
        name = name,
        capacity = capacity,
        duration_ms = tracing::field::Empty,
        success = tracing::field::Empty,
    )
}

/// Run `f` inside a scenario span, recording its duration and outcome
pub fn track_scenario<T, E, F>(name: &str, capacity: usize, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let span = enter_scenario(name, capacity);
    let _enter = span.enter();
    info!("Starting scenario");

    let result = f();
    let duration = start.elapsed().as_millis() as u64;
    span.record("duration_ms", duration);
    match &result {
        Ok(_) => {
            span.record("success", true);
            info!(duration_ms = duration, "Scenario completed");
        }
        Err(e) => {
            span.record("success", false);
            error!(duration_ms = duration, error = %e, "Scenario failed");
        }
    }
    result
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

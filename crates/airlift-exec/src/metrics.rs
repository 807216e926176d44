//! Metrics/tracing hooks.
//!
//! Key/value pairs go out as `trace` events under one span per call site;
//! wire a subscriber in the binary to collect them.

pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::trace_span!("airlift", event);
    let _guard = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}

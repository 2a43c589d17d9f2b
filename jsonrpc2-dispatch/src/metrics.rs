//! Dispatch metrics
//!
//! OpenTelemetry instruments recorded by the dispatcher when a
//! [`DispatchMetrics`] is attached to its configuration. They go to whatever
//! meter provider is installed globally (see
//! `jsonrpc2_core::init_observability`); without one they are no-ops.
//!
//! # Metrics Collected
//!
//! - **requests_total**: requests handled, by method and status (counter)
//! - **request_duration**: handling latency in seconds (histogram)
//! - **batch_size**: elements per batch payload (histogram)
//! - **errors_total**: error responses, by error code (counter)
//! - **parse_failures_total**: payloads rejected as unparsable (counter)
//!
//! The `method` attribute is only the real method name for registered
//! methods; anything else is recorded as `unknown` to keep cardinality
//! bounded.
//!
//! ```rust,no_run
//! use jsonrpc2_dispatch::DispatchMetrics;
//!
//! let metrics = DispatchMetrics::new("billing-rpc");
//! metrics.record_request("invoice.create", "success", 0.004);
//! ```

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

/// Attribute value used for methods that are not registered
pub const UNKNOWN_METHOD: &str = "unknown";

pub struct DispatchMetrics {
    pub requests_total: Counter<u64>,
    pub request_duration: Histogram<f64>,
    pub batch_size: Histogram<u64>,
    pub errors_total: Counter<u64>,
    pub parse_failures_total: Counter<u64>,
}

impl DispatchMetrics {
    /// Create instruments on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into()).build();
        let meter = global::meter_with_scope(scope);
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("jsonrpc2.dispatch.requests.total")
                .with_description("Total number of requests handled")
                .build(),
            request_duration: meter
                .f64_histogram("jsonrpc2.dispatch.request.duration")
                .with_description("Request handling duration in seconds")
                .with_unit("s")
                .build(),
            batch_size: meter
                .u64_histogram("jsonrpc2.dispatch.batch.size")
                .with_description("Number of elements in batch payloads")
                .build(),
            errors_total: meter
                .u64_counter("jsonrpc2.dispatch.errors.total")
                .with_description("Total number of error responses")
                .build(),
            parse_failures_total: meter
                .u64_counter("jsonrpc2.dispatch.parse_failures.total")
                .with_description("Total number of unparsable payloads")
                .build(),
        }
    }

    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    pub fn record_error(&self, code: i64) {
        self.errors_total.add(1, &[KeyValue::new("code", code)]);
    }

    pub fn record_batch(&self, size: u64, mode: &str) {
        self.batch_size
            .record(size, &[KeyValue::new("mode", mode.to_string())]);
    }

    pub fn record_parse_failure(&self) {
        self.parse_failures_total.add(1, &[]);
    }
}

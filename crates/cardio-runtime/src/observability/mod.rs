//! Observability module
//!
//! In-process counters and histograms. Structured logs are emitted directly
//! through `tracing` at each pipeline stage.

pub mod metrics;

pub use metrics::{Counter, Histogram, HistogramSummary, Metrics, MetricsCollector, MetricsSnapshot};

//! Metrics collection and reporting
//!
//! Counters and histograms live outside the prediction path's data: recording
//! a metric never changes what a prediction returns.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Monotonic event counter
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Samples kept for percentile estimates
pub const DEFAULT_WINDOW: usize = 1024;

/// Histogram with running totals over every observation and percentiles
/// over the most recent `window` samples
///
/// Memory is bounded by the window whatever the number of observations.
#[derive(Debug)]
pub struct Histogram {
    window: usize,
    state: RwLock<HistogramState>,
}

#[derive(Debug, Default)]
struct HistogramState {
    count: usize,
    sum: f64,
    max: f64,
    recent: VecDeque<f64>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram keeping at most `window` recent samples (at least one)
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            state: RwLock::new(HistogramState {
                recent: VecDeque::with_capacity(window),
                ..HistogramState::default()
            }),
        }
    }

    pub fn observe(&self, value: f64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.max = if state.count == 0 {
            value
        } else {
            state.max.max(value)
        };
        state.count += 1;
        state.sum += value;

        if state.recent.len() == self.window {
            state.recent.pop_front();
        }
        state.recent.push_back(value);
    }

    /// Observe a duration in seconds
    pub fn observe_duration(&self, duration: Duration) {
        self.observe(duration.as_secs_f64());
    }

    /// Observations since creation or the last reset
    pub fn count(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).count
    }

    /// Samples currently held for percentiles, never more than the window
    pub fn retained(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .recent
            .len()
    }

    /// Count, mean and max over all observations; nearest-rank percentiles
    /// over the retained window. All zero when empty.
    pub fn summary(&self) -> HistogramSummary {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.count == 0 {
            return HistogramSummary::default();
        }

        let mut recent: Vec<f64> = state.recent.iter().copied().collect();
        recent.sort_by(f64::total_cmp);
        let rank = |p: f64| {
            let index = ((p / 100.0) * (recent.len() - 1) as f64).round() as usize;
            recent[index.min(recent.len() - 1)]
        };

        HistogramSummary {
            count: state.count,
            mean: state.sum / state.count as f64,
            p50: rank(50.0),
            p95: rank(95.0),
            max: state.max,
        }
    }

    pub fn reset(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.count = 0;
        state.sum = 0.0;
        state.max = 0.0;
        state.recent.clear();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub count: usize,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub max: f64,
}

/// Point-in-time copy of every metric, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramSummary>,
}

/// Metrics trait
pub trait Metrics: Send + Sync {
    /// Counter registered under `name`, created on first use
    fn counter(&self, name: &str) -> Arc<Counter>;

    /// Histogram registered under `name`, created on first use
    fn histogram(&self, name: &str) -> Arc<Histogram>;

    /// Observe `duration` in the `<operation>_duration` histogram
    fn record_execution_time(&self, operation: &str, duration: Duration) {
        self.histogram(&format!("{}_duration", operation))
            .observe_duration(duration);
    }

    /// Increment the `errors_<kind>` counter
    fn record_error(&self, kind: &str) {
        self.counter(&format!("errors_{}", kind)).inc();
    }
}

/// Named registry of counters and histograms
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: RwLock<BTreeMap<String, Arc<Counter>>>,
    histograms: RwLock<BTreeMap<String, Arc<Histogram>>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered counter names, sorted
    pub fn counter_names(&self) -> Vec<String> {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Registered histogram names, sorted
    pub fn histogram_names(&self) -> Vec<String> {
        self.histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, counter)| (name.clone(), counter.get()))
            .collect();
        let histograms = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, histogram)| (name.clone(), histogram.summary()))
            .collect();

        MetricsSnapshot {
            counters,
            histograms,
        }
    }

    /// Zero every metric; registrations are kept
    pub fn reset_all(&self) {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        counters.values().for_each(|c| c.reset());

        let histograms = self.histograms.read().unwrap_or_else(PoisonError::into_inner);
        histograms.values().for_each(|h| h.reset());
    }
}

impl Metrics for MetricsCollector {
    fn counter(&self, name: &str) -> Arc<Counter> {
        if let Some(counter) = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return counter.clone();
        }

        self.counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .clone()
    }

    fn histogram(&self, name: &str) -> Arc<Histogram> {
        if let Some(histogram) = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return histogram.clone();
        }

        self.histograms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .clone()
    }
}

//! Metrics sources and the collector that caches the latest snapshot.

mod collector;
mod mock;

use std::sync::Arc;

use tracing::info;

use crate::models::SystemMetrics;

pub use collector::LiveSource;
pub use mock::{mock_metrics_at, MockSource};

/// Wall-clock reader, injectable so time-driven code can be pinned in tests.
pub trait Clock: Send + Sync {
    /// Current Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock frozen at one instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Something that can produce a metrics snapshot on demand.
pub trait MetricsSource: Send {
    /// Short name for logs and the header ("mock", "live").
    fn name(&self) -> &'static str;
    /// Produce a fresh snapshot. Never fails.
    fn sample(&mut self) -> SystemMetrics;
}

/// Which source the collector is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Mock,
    Live,
}

impl SourceKind {
    /// Parse a config/CLI value. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "mock" => Some(SourceKind::Mock),
            "live" => Some(SourceKind::Live),
            _ => None,
        }
    }
}

/// Wraps a source and keeps the most recent snapshot for inspection.
pub struct MetricsCollector {
    source: Box<dyn MetricsSource>,
    last: SystemMetrics,
}

impl MetricsCollector {
    pub fn new(mut source: Box<dyn MetricsSource>) -> Self {
        let last = source.sample();
        info!(source = source.name(), "metrics collector initialized");
        Self { source, last }
    }

    /// Build the collector for a configured source kind.
    pub fn from_kind(kind: SourceKind, clock: Arc<dyn Clock>) -> Self {
        match kind {
            SourceKind::Mock => Self::new(Box::new(MockSource::new(clock))),
            SourceKind::Live => Self::new(Box::new(LiveSource::new())),
        }
    }

    /// Sample a fresh snapshot and remember it.
    pub fn get_metrics(&mut self) -> SystemMetrics {
        self.last = self.source.sample();
        self.last.clone()
    }

    /// The snapshot returned by the most recent `get_metrics` call.
    pub fn last(&self) -> &SystemMetrics {
        &self.last
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

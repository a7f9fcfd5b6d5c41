use std::sync::Arc;

use crate::constants::*;
use crate::models::{CpuMetrics, MemoryMetrics, NetworkMetrics, SystemMetrics};

use super::{Clock, MetricsSource};

/// Synthetic metrics: slow sinusoids of wall-clock time scaled into
/// plausible ranges. Stands in for a real source on machines where one
/// isn't wanted.
pub struct MockSource {
    clock: Arc<dyn Clock>,
}

impl MockSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl MetricsSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn sample(&mut self) -> SystemMetrics {
        mock_metrics_at(self.clock.now_ms())
    }
}

/// The mock snapshot for one instant. Pure: same `epoch_ms`, same output.
pub fn mock_metrics_at(epoch_ms: i64) -> SystemMetrics {
    let t = epoch_ms as f64 * MOCK_TIME_FACTOR;
    let memory_swing = (t * 1.3).sin();

    SystemMetrics {
        cpu: CpuMetrics {
            usage: percent((t.sin() * 50.0 + 30.0).abs()), // 0-80%
            temp: ((t * 0.7).cos() * 15.0 + 65.0).abs(),   // 50-80 C
            cores: MOCK_CPU_CORES,
        },
        memory: MemoryMetrics {
            total: MOCK_MEMORY_TOTAL_MB,
            available: MOCK_MEMORY_TOTAL_MB - (memory_swing * 3000.0 + 2000.0).abs(),
            percent: percent((memory_swing * 50.0 + 30.0).abs()),
        },
        network: NetworkMetrics {
            rx: ((t * 2.1).sin() * 500.0 + 100.0).abs(),
            tx: ((t * 1.8).cos() * 300.0 + 50.0).abs(),
        },
        timestamp: epoch_ms,
    }
}

fn percent(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::FixedClock;

    #[test]
    fn same_instant_same_snapshot() {
        let a = mock_metrics_at(1_712_345_678_901);
        let b = mock_metrics_at(1_712_345_678_901);
        assert_eq!(a, b);
    }

    #[test]
    fn source_reads_its_clock() {
        let mut source = MockSource::new(Arc::new(FixedClock(42_000)));
        let first = source.sample();
        let second = source.sample();
        assert_eq!(first, second);
        assert_eq!(first, mock_metrics_at(42_000));
        assert_eq!(first.timestamp, 42_000);
    }

    #[test]
    fn epoch_zero_values() {
        // t = 0: sin = 0, cos = 1
        let m = mock_metrics_at(0);
        assert!((m.cpu.usage - 30.0).abs() < 1e-9);
        assert!((m.cpu.temp - 80.0).abs() < 1e-9);
        assert!((m.memory.percent - 30.0).abs() < 1e-9);
        assert!((m.memory.available - 6192.0).abs() < 1e-9);
        assert!((m.network.rx - 100.0).abs() < 1e-9);
        assert!((m.network.tx - 350.0).abs() < 1e-9);
        assert_eq!(m.cpu.cores, 4);
        assert_eq!(m.memory.total, 8192.0);
    }

    #[test]
    fn fields_stay_in_documented_ranges() {
        // Sweep well past one full period of the slowest component.
        for step in 0..5_000i64 {
            let m = mock_metrics_at(step * 37_000);
            assert!((0.0..=100.0).contains(&m.cpu.usage), "usage {}", m.cpu.usage);
            assert!((0.0..=100.0).contains(&m.memory.percent), "mem {}", m.memory.percent);
            assert!((50.0..=80.0).contains(&m.cpu.temp), "temp {}", m.cpu.temp);
            assert!(m.memory.available >= 3192.0 && m.memory.available <= 8192.0);
            assert!(m.network.rx >= 0.0 && m.network.rx <= 600.0);
            assert!(m.network.tx >= 0.0 && m.network.tx <= 350.0);
        }
    }

    #[test]
    fn memory_used_matches_available() {
        let m = mock_metrics_at(123_456_789);
        assert!((m.memory_used() - (m.memory.total - m.memory.available)).abs() < 1e-9);
    }
}

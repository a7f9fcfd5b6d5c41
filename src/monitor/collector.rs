use std::time::{Duration, Instant};

use sysinfo::{Components, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};

use crate::constants::LIVE_SAMPLE_INTERVAL_MS;
use crate::models::{CpuMetrics, MemoryMetrics, NetworkMetrics, SystemMetrics};

use super::MetricsSource;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
const BYTES_PER_KIB: f64 = 1024.0;

/// Samples the real machine through sysinfo.
/// Only gathers data, no interpretation.
///
/// sysinfo needs `MINIMUM_CPU_UPDATE_INTERVAL` between CPU refreshes, so
/// samples requested sooner than `min_interval` return the cached snapshot.
pub struct LiveSource {
    sys: System,
    networks: Networks,
    components: Components,
    min_interval: Duration,
    /// Time of the previous refresh, for rate calculation and throttling
    last_refresh: Instant,
    cached: Option<SystemMetrics>,
}

impl LiveSource {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(LIVE_SAMPLE_INTERVAL_MS))
    }

    /// Build a source that refreshes at most once per `min_interval`
    /// (raised to sysinfo's CPU minimum if shorter).
    pub fn with_interval(min_interval: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        // Allow initial CPU data to settle
        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_memory();

        Self {
            sys,
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            min_interval: min_interval.max(MINIMUM_CPU_UPDATE_INTERVAL),
            last_refresh: Instant::now(),
            cached: None,
        }
    }

    /// Hottest CPU-looking sensor, or the hottest sensor of any kind.
    /// 0 when the machine exposes none (VMs, WSL).
    fn cpu_temperature(&self) -> f64 {
        let mut cpu_max: Option<f32> = None;
        let mut any_max: Option<f32> = None;

        for component in self.components.list() {
            let temp = component.temperature();
            if !temp.is_finite() {
                continue;
            }
            any_max = Some(any_max.map_or(temp, |m| m.max(temp)));

            let label = component.label().to_lowercase();
            if label.contains("cpu")
                || label.contains("package")
                || label.contains("core")
                || label.contains("tdie")
                || label.contains("k10temp")
            {
                cpu_max = Some(cpu_max.map_or(temp, |m| m.max(temp)));
            }
        }

        cpu_max.or(any_max).unwrap_or(0.0) as f64
    }

    fn refresh(&mut self) -> SystemMetrics {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.networks.refresh();
        self.components.refresh();

        let elapsed = self.last_refresh.elapsed().as_secs_f64().max(0.001);
        self.last_refresh = Instant::now();

        let (rx_bytes, tx_bytes) = self
            .networks
            .iter()
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (rx + data.received(), tx + data.transmitted())
            });

        let total = self.sys.total_memory() as f64 / BYTES_PER_MIB;
        let available = self.sys.available_memory() as f64 / BYTES_PER_MIB;
        let percent = if total > 0.0 {
            ((total - available) / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        SystemMetrics {
            cpu: CpuMetrics {
                usage: (self.sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                temp: self.cpu_temperature(),
                cores: self.sys.cpus().len() as u32,
            },
            memory: MemoryMetrics {
                total,
                available,
                percent,
            },
            network: NetworkMetrics {
                rx: rx_bytes as f64 / BYTES_PER_KIB / elapsed,
                tx: tx_bytes as f64 / BYTES_PER_KIB / elapsed,
            },
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Default for LiveSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for LiveSource {
    fn name(&self) -> &'static str {
        "live"
    }

    fn sample(&mut self) -> SystemMetrics {
        if let Some(cached) = &self.cached {
            if self.last_refresh.elapsed() < self.min_interval {
                return cached.clone();
            }
        }
        let fresh = self.refresh();
        self.cached = Some(fresh.clone());
        fresh
    }
}

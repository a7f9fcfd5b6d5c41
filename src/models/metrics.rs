use serde::Serialize;

/// One sampled instant of machine health.
/// Immutable; a fresh snapshot is built for every query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetrics {
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub network: NetworkMetrics,
    /// Unix epoch milliseconds at which the sample was taken.
    pub timestamp: i64,
}

/// CPU readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuMetrics {
    pub usage: f64, // 0-100%
    pub temp: f64,  // Celsius
    pub cores: u32,
}

/// Memory readings, in MiB.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryMetrics {
    pub total: f64,
    pub available: f64,
    pub percent: f64, // 0-100% used
}

/// Network throughput, in KiB/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkMetrics {
    pub rx: f64,
    pub tx: f64,
}

impl SystemMetrics {
    /// Memory in use, in MiB.
    pub fn memory_used(&self) -> f64 {
        (self.memory.total - self.memory.available).max(0.0)
    }
}

//! Types that mirror the backend's JSON schema.

use serde::{Deserialize, Serialize};

/// Point-in-time system metrics returned by `GET /metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub disk: DiskMetrics,
    pub network: NetworkMetrics,
    pub system: SystemInfo,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    pub usage: f64,
    pub count: u32,
    pub frequency: CpuFrequency,
}

/// Frequencies in MHz.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CpuFrequency {
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub max: f64,
}

/// Sizes are reported by the backend in GB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub total: f64,
    pub available: f64,
    pub used: f64,
    pub usage: f64,
    #[serde(default)]
    pub swap: SwapMetrics,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SwapMetrics {
    pub total: f64,
    pub used: f64,
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskMetrics {
    pub total: f64,
    pub used: f64,
    pub free: f64,
    pub usage: f64,
    #[serde(default)]
    pub io: DiskIo,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiskIo {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Cumulative counters since boot; never deltas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub architecture: String,
    pub processor: String,
    pub hostname: String,
    pub uptime: String,
    pub boot_time: String,
    /// 1, 5 and 15 minute load. Any other length fails deserialization.
    pub load_average: [f64; 3],
    pub processes: u32,
}

impl SystemMetrics {
    /// Clamp every percentage field into `[0, 100]`.
    pub fn normalized(mut self) -> Self {
        self.cpu.usage = clamp_percent(self.cpu.usage);
        self.memory.usage = clamp_percent(self.memory.usage);
        self.memory.swap.usage = clamp_percent(self.memory.swap.usage);
        self.disk.usage = clamp_percent(self.disk.usage);
        self
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// One row of `GET /processes`.
///
/// The backend omits fields it could not read, so the per-process metrics are
/// optional: `None` means "not reported", which is distinct from a measured 0%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub pid: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_percent: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Process {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Unknown Process",
        }
    }

    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn metrics_with_cpu(usage: f64) -> SystemMetrics {
        SystemMetrics {
            cpu: CpuMetrics {
                usage,
                count: 8,
                frequency: CpuFrequency {
                    current: 2400.0,
                    max: 3600.0,
                },
            },
            memory: MemoryMetrics {
                total: 16.0,
                available: 6.0,
                used: 10.0,
                usage: 62.5,
                swap: SwapMetrics {
                    total: 2.0,
                    used: 0.5,
                    usage: 25.0,
                },
            },
            disk: DiskMetrics {
                total: 512.0,
                used: 256.0,
                free: 256.0,
                usage: 50.0,
                io: DiskIo {
                    read_bytes: 1_000,
                    write_bytes: 2_000,
                },
            },
            network: NetworkMetrics {
                bytes_sent: 10_000,
                bytes_recv: 20_000,
                packets_sent: 100,
                packets_recv: 200,
            },
            system: SystemInfo {
                os: "Linux".to_string(),
                architecture: "x86_64".to_string(),
                processor: "Example CPU @ 2.40GHz".to_string(),
                hostname: "devbox".to_string(),
                uptime: "3 days, 4:05:06".to_string(),
                boot_time: "2026-10-16 08:00:00".to_string(),
                load_average: [0.5, 0.75, 1.0],
                processes: 312,
            },
            timestamp: "2026-10-19T12:00:00".to_string(),
        }
    }

    pub fn process(pid: u32, name: &str, cpu: f64) -> Process {
        Process {
            pid,
            name: Some(name.to_string()),
            cpu_percent: Some(cpu),
            memory_percent: Some(1.5),
            status: Some("running".to_string()),
        }
    }
}

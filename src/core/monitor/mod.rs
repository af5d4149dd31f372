//! Metric sampling core.
//!
//! Each monitor owns the "last observed" state for one metric and converts
//! cumulative OS counters into per-interval readings. Monitors are
//! independent: one failing counter source never affects the others.

mod cpu;
mod disk;
mod gpu;
mod memory;
mod network;
mod rate;
mod set;
pub mod sources;

pub use cpu::CpuMonitor;
pub use disk::DiskMonitor;
pub use gpu::{GpuDeviceReading, GpuMonitor};
pub use memory::MemoryMonitor;
pub use network::NetworkMonitor;
pub use rate::RateCounter;
pub use set::MetricSet;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

/// Identifier for a displayable metric.
///
/// The variant set is closed on purpose: matching on it forces every
/// consumer to handle all metrics the overlay can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Network,
    Cpu,
    Gpu,
    Disk,
    Memory,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Network,
        MetricKind::Cpu,
        MetricKind::Gpu,
        MetricKind::Disk,
        MetricKind::Memory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Network => "network",
            MetricKind::Cpu => "cpu",
            MetricKind::Gpu => "gpu",
            MetricKind::Disk => "disk",
            MetricKind::Memory => "memory",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for MetricKind {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "network" | "net" => Ok(MetricKind::Network),
            "cpu" => Ok(MetricKind::Cpu),
            "gpu" => Ok(MetricKind::Gpu),
            "disk" => Ok(MetricKind::Disk),
            "memory" | "mem" => Ok(MetricKind::Memory),
            other => Err(MonitorError::UnknownMetric(other.to_string())),
        }
    }
}

/// One sampling result, produced once per tick per active monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reading {
    Network {
        upload_bytes: u64,
        download_bytes: u64,
    },
    Cpu {
        usage_percent: f64,
    },
    Gpu {
        devices: Vec<GpuDeviceReading>,
    },
    Disk {
        read_bytes: u64,
        written_bytes: u64,
    },
    Memory {
        used_bytes: u64,
        total_bytes: u64,
    },
}

/// A live monitor for one metric.
///
/// Constructed when the metric is activated and dropped when it is
/// deactivated; all baseline state lives inside the variant.
pub enum Monitor {
    Network(NetworkMonitor),
    Cpu(CpuMonitor),
    Gpu(GpuMonitor),
    Disk(DiskMonitor),
    Memory(MemoryMonitor),
}

impl Monitor {
    /// Construct the monitor backing `kind` against the host's counter
    /// sources, capturing the initial baseline where the metric needs one.
    pub fn new(kind: MetricKind) -> Result<Self> {
        match kind {
            MetricKind::Network => Ok(Monitor::Network(NetworkMonitor::new()?)),
            MetricKind::Cpu => Ok(Monitor::Cpu(CpuMonitor::new()?)),
            MetricKind::Gpu => Ok(Monitor::Gpu(GpuMonitor::new())),
            MetricKind::Disk => Ok(Monitor::Disk(DiskMonitor::new()?)),
            MetricKind::Memory => Ok(Monitor::Memory(MemoryMonitor::new()?)),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Monitor::Network(_) => MetricKind::Network,
            Monitor::Cpu(_) => MetricKind::Cpu,
            Monitor::Gpu(_) => MetricKind::Gpu,
            Monitor::Disk(_) => MetricKind::Disk,
            Monitor::Memory(_) => MetricKind::Memory,
        }
    }

    /// Take one sample, advancing the monitor's baseline.
    pub fn sample(&mut self) -> Result<Reading> {
        match self {
            Monitor::Network(m) => {
                let (upload_bytes, download_bytes) = m.sample()?;
                Ok(Reading::Network {
                    upload_bytes,
                    download_bytes,
                })
            }
            Monitor::Cpu(m) => Ok(Reading::Cpu {
                usage_percent: m.sample()?,
            }),
            Monitor::Gpu(m) => Ok(Reading::Gpu {
                devices: m.sample(),
            }),
            Monitor::Disk(m) => {
                let (read_bytes, written_bytes) = m.sample()?;
                Ok(Reading::Disk {
                    read_bytes,
                    written_bytes,
                })
            }
            Monitor::Memory(m) => {
                let (used_bytes, total_bytes) = m.sample()?;
                Ok(Reading::Memory {
                    used_bytes,
                    total_bytes,
                })
            }
        }
    }
}

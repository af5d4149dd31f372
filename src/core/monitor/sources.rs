//! Counter-source seams between the monitors and the platform layer.
//!
//! Each trait abstracts one OS counter source so monitors can be driven by
//! the real platform implementations in production and by scripted fakes in
//! tests. Implementations live in [`crate::platform`].

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Cumulative network I/O counters, summed across all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetIoCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

pub trait NetIoSource: Send {
    fn counters(&mut self) -> Result<NetIoCounters>;
}

/// Cumulative disk I/O counters, summed across physical devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskIoCounters {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

pub trait DiskIoSource: Send {
    fn counters(&mut self) -> Result<DiskIoCounters>;
}

/// Cumulative CPU time buckets in clock ticks, aggregated over all cores.
///
/// Mirrors the aggregate `cpu` line of `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    /// Sum of all time buckets.
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }
}

pub trait CpuTimeSource: Send {
    fn times(&mut self) -> Result<CpuTimes>;
}

/// Instantaneous memory usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCounters {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

pub trait MemorySource: Send {
    fn counters(&mut self) -> Result<MemoryCounters>;
}

/// Enumerated GPU devices and their instantaneous utilization.
///
/// `device_count` is fixed at enumeration time; `utilization` may fail per
/// device without invalidating the other indices.
pub trait GpuDeviceSource: Send {
    fn device_count(&self) -> u32;

    /// `(core_pct, memory_pct)` for one device, both integers 0-100.
    fn utilization(&self, index: u32) -> Result<(u32, u32)>;
}

//! Platform-backed counter sources.
//!
//! Network and memory counters come from `sysinfo`, which covers every
//! supported desktop platform. CPU time buckets and disk I/O bytes are not
//! exposed by `sysinfo` as cumulative counters, so those two read procfs
//! directly and report [`MonitorError::CounterUnavailable`] elsewhere.

use std::fs;

use sysinfo::{MemoryRefreshKind, Networks, RefreshKind, System};

use crate::core::monitor::sources::{
    CpuTimeSource, CpuTimes, DiskIoCounters, DiskIoSource, MemoryCounters, MemorySource,
    NetIoCounters, NetIoSource,
};
use crate::error::{MonitorError, Result};

const PROC_STAT: &str = "/proc/stat";
const PROC_DISKSTATS: &str = "/proc/diskstats";

/// /proc/diskstats reports sector counts; sectors are always 512 bytes
/// there regardless of the device's physical sector size.
const SECTOR_SIZE: u64 = 512;

/// Network counters summed across all interfaces.
pub struct SysinfoNetIo {
    networks: Networks,
}

impl SysinfoNetIo {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoNetIo {
    fn default() -> Self {
        Self::new()
    }
}

impl NetIoSource for SysinfoNetIo {
    fn counters(&mut self) -> Result<NetIoCounters> {
        self.networks.refresh(true);

        let mut totals = NetIoCounters::default();
        for data in self.networks.values() {
            totals.bytes_sent += data.total_transmitted();
            totals.bytes_received += data.total_received();
        }
        Ok(totals)
    }
}

/// Memory counters from the system allocator's point of view.
pub struct SysinfoMemory {
    system: System,
}

impl SysinfoMemory {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
            ),
        }
    }
}

impl Default for SysinfoMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource for SysinfoMemory {
    fn counters(&mut self) -> Result<MemoryCounters> {
        self.system.refresh_memory();
        Ok(MemoryCounters {
            used_bytes: self.system.used_memory(),
            total_bytes: self.system.total_memory(),
        })
    }
}

/// Aggregate CPU time buckets from the `cpu` line of `/proc/stat`.
pub struct ProcStatCpu {
    _private: (),
}

impl ProcStatCpu {
    /// Fails with [`MonitorError::CounterUnavailable`] on hosts without
    /// a readable `/proc/stat`.
    pub fn new() -> Result<Self> {
        let mut source = Self { _private: () };
        source.times()?;
        Ok(source)
    }
}

impl CpuTimeSource for ProcStatCpu {
    fn times(&mut self) -> Result<CpuTimes> {
        let content = fs::read_to_string(PROC_STAT).map_err(|e| {
            MonitorError::counter_unavailable(format!("cannot read {}: {}", PROC_STAT, e))
        })?;
        parse_cpu_times(&content)
    }
}

fn parse_cpu_times(content: &str) -> Result<CpuTimes> {
    let line = content
        .lines()
        .find(|line| line.starts_with("cpu "))
        .ok_or_else(|| MonitorError::counter_parse(PROC_STAT, "no aggregate cpu line"))?;

    let mut fields = line.split_whitespace().skip(1).map(|field| {
        field.parse::<u64>().map_err(|_| {
            MonitorError::counter_parse(PROC_STAT, format!("non-numeric field '{}'", field))
        })
    });

    // Older kernels emit fewer columns; missing buckets count as zero.
    let mut next = || fields.next().transpose().map(Option::unwrap_or_default);
    Ok(CpuTimes {
        user: next()?,
        nice: next()?,
        system: next()?,
        idle: next()?,
        iowait: next()?,
        irq: next()?,
        softirq: next()?,
        steal: next()?,
    })
}

/// Cumulative disk I/O bytes summed over physical block devices, from
/// `/proc/diskstats`.
pub struct ProcDiskIo {
    _private: (),
}

impl ProcDiskIo {
    /// Fails with [`MonitorError::CounterUnavailable`] on hosts without
    /// a readable `/proc/diskstats` (sandboxes, some VMs, non-Linux).
    pub fn new() -> Result<Self> {
        let mut source = Self { _private: () };
        source.counters()?;
        Ok(source)
    }
}

impl DiskIoSource for ProcDiskIo {
    fn counters(&mut self) -> Result<DiskIoCounters> {
        let content = fs::read_to_string(PROC_DISKSTATS).map_err(|e| {
            MonitorError::counter_unavailable(format!("cannot read {}: {}", PROC_DISKSTATS, e))
        })?;
        parse_diskstats(&content)
    }
}

fn parse_diskstats(content: &str) -> Result<DiskIoCounters> {
    let mut totals = DiskIoCounters::default();
    let mut disks: Vec<String> = Vec::new();

    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        // major minor name reads .. sectors_read(idx 5) .. sectors_written(idx 9)
        if fields.len() < 10 {
            continue;
        }
        let name = fields[2];
        if name.starts_with("loop") || name.starts_with("ram") {
            continue;
        }
        if is_partition_of(name, &disks) {
            continue;
        }

        let sectors_read: u64 = fields[5].parse().map_err(|_| {
            MonitorError::counter_parse(PROC_DISKSTATS, format!("bad sector count for {}", name))
        })?;
        let sectors_written: u64 = fields[9].parse().map_err(|_| {
            MonitorError::counter_parse(PROC_DISKSTATS, format!("bad sector count for {}", name))
        })?;

        totals.bytes_read += sectors_read * SECTOR_SIZE;
        totals.bytes_written += sectors_written * SECTOR_SIZE;
        disks.push(name.to_string());
    }

    Ok(totals)
}

/// Partitions follow their whole-disk entry and append a digit ("sda1")
/// or a "p"-digit suffix ("nvme0n1p2"); counting both would double the
/// totals.
fn is_partition_of(name: &str, disks: &[String]) -> bool {
    disks.iter().any(|disk| {
        name.strip_prefix(disk.as_str()).is_some_and(|suffix| {
            let suffix = suffix.strip_prefix('p').unwrap_or(suffix);
            !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit())
        })
    })
}

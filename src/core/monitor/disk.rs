//! Disk I/O throughput monitor.

use crate::core::monitor::rate::RateCounter;
use crate::core::monitor::sources::{DiskIoCounters, DiskIoSource};
use crate::error::Result;
use crate::platform::counters::ProcDiskIo;

/// Converts the cumulative bytes-read/bytes-written counters into
/// per-interval read/write deltas.
///
/// Hosts without disk I/O counters (sandboxes, some VMs) fail construction
/// with [`crate::MonitorError::CounterUnavailable`]; callers treat that as
/// "no data", not as a fatal condition.
pub struct DiskMonitor {
    source: Box<dyn DiskIoSource>,
    rate: RateCounter,
}

impl DiskMonitor {
    /// Monitor backed by the host's disk counters.
    pub fn new() -> Result<Self> {
        Self::with_source(Box::new(ProcDiskIo::new()?))
    }

    /// Monitor over a custom counter source, capturing the baseline now.
    pub fn with_source(mut source: Box<dyn DiskIoSource>) -> Result<Self> {
        let DiskIoCounters {
            bytes_read,
            bytes_written,
        } = source.counters()?;
        Ok(Self {
            source,
            rate: RateCounter::new(bytes_read, bytes_written),
        })
    }

    /// `(read_bytes, written_bytes)` transferred since the previous call.
    pub fn sample(&mut self) -> Result<(u64, u64)> {
        let current = self.source.counters()?;
        Ok(self.rate.sample(current.bytes_read, current.bytes_written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;

    struct ScriptedDiskIo {
        readings: Vec<DiskIoCounters>,
    }

    impl DiskIoSource for ScriptedDiskIo {
        fn counters(&mut self) -> Result<DiskIoCounters> {
            if self.readings.is_empty() {
                return Err(MonitorError::counter_unavailable("script exhausted"));
            }
            Ok(self.readings.remove(0))
        }
    }

    fn scripted(readings: &[(u64, u64)]) -> Box<ScriptedDiskIo> {
        Box::new(ScriptedDiskIo {
            readings: readings
                .iter()
                .map(|&(bytes_read, bytes_written)| DiskIoCounters {
                    bytes_read,
                    bytes_written,
                })
                .collect(),
        })
    }

    #[test]
    fn test_read_write_deltas() {
        let mut monitor =
            DiskMonitor::with_source(scripted(&[(1000, 4000), (1512, 4096)])).unwrap();
        assert_eq!(monitor.sample().unwrap(), (512, 96));
    }

    #[test]
    fn test_unavailable_source_fails_construction() {
        let result = DiskMonitor::with_source(scripted(&[]));
        assert!(matches!(
            result,
            Err(MonitorError::CounterUnavailable(_))
        ));
    }

    #[test]
    fn test_counter_reset_clamps_to_zero() {
        let mut monitor =
            DiskMonitor::with_source(scripted(&[(9000, 9000), (100, 9500)])).unwrap();
        assert_eq!(monitor.sample().unwrap(), (0, 500));
    }
}

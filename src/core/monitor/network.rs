//! Network throughput monitor.

use crate::core::monitor::rate::RateCounter;
use crate::core::monitor::sources::{NetIoCounters, NetIoSource};
use crate::error::Result;
use crate::platform::counters::SysinfoNetIo;

/// Converts the cumulative bytes-sent/bytes-received counters into
/// per-interval upload/download deltas.
pub struct NetworkMonitor {
    source: Box<dyn NetIoSource>,
    rate: RateCounter,
}

impl NetworkMonitor {
    /// Monitor backed by the host's interface counters.
    pub fn new() -> Result<Self> {
        Self::with_source(Box::new(SysinfoNetIo::new()))
    }

    /// Monitor over a custom counter source.
    ///
    /// Reads the source once to capture the baseline, so the first sample
    /// measures a real interval instead of bytes-since-boot.
    pub fn with_source(mut source: Box<dyn NetIoSource>) -> Result<Self> {
        let NetIoCounters {
            bytes_sent,
            bytes_received,
        } = source.counters()?;
        Ok(Self {
            source,
            rate: RateCounter::new(bytes_sent, bytes_received),
        })
    }

    /// `(upload_bytes, download_bytes)` transferred since the previous call.
    pub fn sample(&mut self) -> Result<(u64, u64)> {
        let current = self.source.counters()?;
        Ok(self
            .rate
            .sample(current.bytes_sent, current.bytes_received))
    }
}

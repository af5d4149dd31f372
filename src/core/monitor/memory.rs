//! Memory usage monitor.

use crate::core::monitor::sources::{MemoryCounters, MemorySource};
use crate::error::Result;
use crate::platform::counters::SysinfoMemory;

/// Reports instantaneous memory usage.
///
/// Memory is not a rate: there is no baseline and each sample is an
/// independent snapshot of `(used_bytes, total_bytes)`.
pub struct MemoryMonitor {
    source: Box<dyn MemorySource>,
}

impl MemoryMonitor {
    /// Monitor backed by the host's memory counters.
    pub fn new() -> Result<Self> {
        Ok(Self::with_source(Box::new(SysinfoMemory::new())))
    }

    pub fn with_source(source: Box<dyn MemorySource>) -> Self {
        Self { source }
    }

    /// `(used_bytes, total_bytes)` at this instant.
    pub fn sample(&mut self) -> Result<(u64, u64)> {
        let MemoryCounters {
            used_bytes,
            total_bytes,
        } = self.source.counters()?;
        Ok((used_bytes, total_bytes))
    }
}

//! CPU utilization monitor.

use crate::core::monitor::sources::{CpuTimeSource, CpuTimes};
use crate::error::Result;
use crate::platform::counters::ProcStatCpu;

/// Computes CPU utilization over the last interval from the cumulative
/// time-bucket counters.
pub struct CpuMonitor {
    source: Box<dyn CpuTimeSource>,
    baseline: CpuTimes,
}

impl CpuMonitor {
    /// Monitor backed by the host's CPU time counters.
    pub fn new() -> Result<Self> {
        Self::with_source(Box::new(ProcStatCpu::new()?))
    }

    /// Monitor over a custom time source, capturing the baseline now.
    pub fn with_source(mut source: Box<dyn CpuTimeSource>) -> Result<Self> {
        let baseline = source.times()?;
        Ok(Self { source, baseline })
    }

    /// Utilization percentage (0.0-100.0) over the interval since the
    /// previous call.
    ///
    /// A zero total delta (polled faster than the counter resolution, or
    /// immediately after construction) yields `0.0` rather than dividing
    /// by zero. The baseline advances unconditionally either way.
    pub fn sample(&mut self) -> Result<f64> {
        let current = self.source.times()?;
        let total_delta = current.total().saturating_sub(self.baseline.total());
        let idle_delta = current.idle.saturating_sub(self.baseline.idle);
        self.baseline = current;

        if total_delta == 0 {
            return Ok(0.0);
        }
        let busy_delta = total_delta.saturating_sub(idle_delta);
        Ok(busy_delta as f64 / total_delta as f64 * 100.0)
    }
}

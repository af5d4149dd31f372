//! GPU utilization monitor.

use serde::{Deserialize, Serialize};

use crate::core::monitor::sources::GpuDeviceSource;

/// Instantaneous utilization of one GPU device, produced per sweep and
/// never persisted across samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuDeviceReading {
    pub device_index: u32,
    pub core_utilization_pct: u32,
    pub memory_utilization_pct: u32,
}

/// Queries instantaneous utilization for every enumerated GPU device.
///
/// Unlike the counter-based monitors there is no baseline: the management
/// library already reports utilization over its own internal window. The
/// device count is enumerated once at construction. GPU absence is an
/// expected condition, represented as zero devices rather than an error.
pub struct GpuMonitor {
    source: Option<Box<dyn GpuDeviceSource>>,
    device_count: u32,
}

impl Default for GpuMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuMonitor {
    /// Monitor backed by NVML.
    ///
    /// An init failure (no driver, no NVIDIA hardware) degrades to zero
    /// devices; the failure is logged and sampling reports an empty sweep.
    pub fn new() -> Self {
        match crate::platform::gpu::NvmlDevices::init() {
            Ok(devices) => Self::with_source(Box::new(devices)),
            Err(e) => {
                log::warn!("Failed to initialize NVML: {}", e);
                Self {
                    source: None,
                    device_count: 0,
                }
            }
        }
    }

    /// Monitor over a custom device source, enumerating its devices now.
    pub fn with_source(source: Box<dyn GpuDeviceSource>) -> Self {
        let device_count = source.device_count();
        Self {
            source: Some(source),
            device_count,
        }
    }

    pub fn device_count(&self) -> u32 {
        self.device_count
    }

    /// `true` when construction degraded to zero devices.
    pub fn is_degraded(&self) -> bool {
        self.source.is_none()
    }

    /// One utilization reading per device, in enumeration order.
    ///
    /// A device whose query fails is skipped and logged; the sweep
    /// continues so partial results stay valid.
    pub fn sample(&mut self) -> Vec<GpuDeviceReading> {
        let Some(source) = self.source.as_ref() else {
            return Vec::new();
        };

        let mut readings = Vec::with_capacity(self.device_count as usize);
        for index in 0..self.device_count {
            match source.utilization(index) {
                Ok((core_utilization_pct, memory_utilization_pct)) => {
                    readings.push(GpuDeviceReading {
                        device_index: index,
                        core_utilization_pct,
                        memory_utilization_pct,
                    });
                }
                Err(e) => log::warn!("Failed to get GPU {} data: {}", index, e),
            }
        }
        readings
    }
}

#[cfg(feature = "nvml")]
use nvml_wrapper::Nvml;

use crate::core::monitor::sources::GpuDeviceSource;
use crate::error::{MonitorError, Result};

/// NVML-backed device source.
///
/// Owns the library handle: NVML is initialized exactly once per value and
/// shut down when the value drops, so deactivating the GPU metric releases
/// the library deterministically. `nvml-wrapper` swallows shutdown errors
/// on drop, so a failed release can never take the process down.
pub struct NvmlDevices {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
    device_count: u32,
}

impl NvmlDevices {
    /// Initialize NVML and enumerate the device count.
    pub fn init() -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init().map_err(|e| {
                MonitorError::gpu_not_available(format!("failed to init NVML: {}", e))
            })?;
            let device_count = nvml.device_count().map_err(|e| {
                MonitorError::gpu_not_available(format!("failed to count devices: {}", e))
            })?;
            Ok(Self { nvml, device_count })
        }
        #[cfg(not(feature = "nvml"))]
        {
            Err(MonitorError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }
}

impl GpuDeviceSource for NvmlDevices {
    fn device_count(&self) -> u32 {
        self.device_count
    }

    fn utilization(&self, index: u32) -> Result<(u32, u32)> {
        #[cfg(feature = "nvml")]
        {
            let device = self.nvml.device_by_index(index).map_err(|e| {
                MonitorError::metric_collection(format!("failed to get GPU {}: {}", index, e))
            })?;
            let utilization = device.utilization_rates().map_err(|e| {
                MonitorError::metric_collection(format!(
                    "failed to read GPU {} utilization: {}",
                    index, e
                ))
            })?;
            Ok((utilization.gpu, utilization.memory))
        }
        #[cfg(not(feature = "nvml"))]
        {
            let _ = index;
            Err(MonitorError::gpu_not_available(
                "NVIDIA GPU support not enabled",
            ))
        }
    }
}

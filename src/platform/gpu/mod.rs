//! GPU-specific platform code.
//!
//! Provides GPU device enumeration and utilization queries via NVML.

mod nvidia;

pub use nvidia::NvmlDevices;

// Platform-specific code module

pub mod counters;
pub mod gpu;

// Re-exports for cleaner imports
pub use counters::{ProcDiskIo, ProcStatCpu, SysinfoMemory, SysinfoNetIo};

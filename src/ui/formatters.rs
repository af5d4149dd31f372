//! Pure formatting of readings into display strings.
//!
//! These functions are stateless: the same reading always renders to the
//! same string, and nothing here touches monitor state.

use crate::core::monitor::{GpuDeviceReading, MetricKind, Reading};
use crate::error::Result;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Format a per-interval byte delta as a transfer rate.
///
/// Below 1 MiB the rate renders as KB/s, above as MB/s, one decimal in
/// both cases. These exact thresholds match the overlay labels.
pub fn format_rate(delta_bytes: u64) -> String {
    if delta_bytes < MIB {
        format!("{:.1} KB/s", delta_bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB/s", delta_bytes as f64 / MIB as f64)
    }
}

/// Format a utilization percentage with one decimal.
pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format an absolute size with a B/KB/MB/GB ladder (memory totals exceed
/// the MB range the rate ladder stops at).
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GIB as f64)
    }
}

/// Format one line per GPU device in enumeration order, or the no-GPU
/// marker when the sweep was empty.
pub fn format_gpu(readings: &[GpuDeviceReading]) -> String {
    if readings.is_empty() {
        return "No Nvidia GPU found".to_string();
    }
    readings
        .iter()
        .map(|gpu| {
            format!(
                "GPU {}: Usage {}%, Memory {}%",
                gpu.device_index, gpu.core_utilization_pct, gpu.memory_utilization_pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one reading as its display string.
pub fn format_reading(reading: &Reading) -> String {
    match reading {
        Reading::Network {
            upload_bytes,
            download_bytes,
        } => format!(
            "up {}, down {}",
            format_rate(*upload_bytes),
            format_rate(*download_bytes)
        ),
        Reading::Cpu { usage_percent } => format_percent(*usage_percent),
        Reading::Gpu { devices } => format_gpu(devices),
        Reading::Disk {
            read_bytes,
            written_bytes,
        } => format!(
            "read {}, write {}",
            format_rate(*read_bytes),
            format_rate(*written_bytes)
        ),
        Reading::Memory {
            used_bytes,
            total_bytes,
        } => format!(
            "{} / {}",
            format_size(*used_bytes),
            format_size(*total_bytes)
        ),
    }
}

/// Render a sampling pass as the metric -> string mapping the display
/// layer pulls each tick. A failed sample renders as "n/a" and is logged.
pub fn render_pass(pass: &[(MetricKind, Result<Reading>)]) -> Vec<(MetricKind, String)> {
    pass.iter()
        .map(|(kind, result)| match result {
            Ok(reading) => (*kind, format_reading(reading)),
            Err(e) => {
                log::warn!("{} sample failed: {}", kind, e);
                (*kind, "n/a".to_string())
            }
        })
        .collect()
}

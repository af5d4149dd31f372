use std::io;
use thiserror::Error;

/// Custom error type for the deskmon sampling core
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The host does not expose this counter source (e.g. no disk I/O
    /// counters in a sandboxed or virtualized environment).
    #[error("counter unavailable: {0}")]
    CounterUnavailable(String),

    #[error("failed to parse {path}: {detail}")]
    CounterParse { path: String, detail: String },

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("metric collection failed: {0}")]
    MetricCollection(String),

    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

/// Result type alias for the deskmon sampling core
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a counter-unavailable error
    pub fn counter_unavailable<S: Into<String>>(msg: S) -> Self {
        MonitorError::CounterUnavailable(msg.into())
    }

    /// Create a parse error for a counter file
    pub fn counter_parse<P: Into<String>, D: Into<String>>(path: P, detail: D) -> Self {
        MonitorError::CounterParse {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create a GPU-not-available error
    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        MonitorError::GpuNotAvailable(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        MonitorError::MetricCollection(msg.into())
    }
}

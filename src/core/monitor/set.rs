//! Active metric set.
//!
//! Tracks which metrics are currently displayed and owns their live
//! monitors. Insertion order is display order. Invariant: every active
//! kind has exactly one monitor and every monitor backs an active kind.

use crate::core::monitor::{MetricKind, Monitor, Reading};
use crate::error::Result;

/// Ordered collection of active metrics and their monitors.
#[derive(Default)]
pub struct MetricSet {
    active: Vec<Monitor>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a metric, constructing its monitor (and capturing its
    /// baseline) now. Activating an already-active metric is idempotent:
    /// the existing monitor and its state are kept.
    pub fn activate(&mut self, kind: MetricKind) -> Result<()> {
        if self.is_active(kind) {
            return Ok(());
        }
        self.install(Monitor::new(kind)?);
        Ok(())
    }

    /// Install a pre-built monitor, e.g. one constructed over a custom
    /// counter source. Replaces any existing monitor of the same kind.
    pub fn install(&mut self, monitor: Monitor) {
        self.deactivate(monitor.kind());
        self.active.push(monitor);
    }

    /// Deactivate a metric, dropping its monitor and all baseline state.
    /// Deactivating an inactive metric is a no-op.
    pub fn deactivate(&mut self, kind: MetricKind) {
        self.active.retain(|monitor| monitor.kind() != kind);
    }

    pub fn is_active(&self, kind: MetricKind) -> bool {
        self.active.iter().any(|monitor| monitor.kind() == kind)
    }

    /// Active kinds in display order.
    pub fn active_kinds(&self) -> impl Iterator<Item = MetricKind> + '_ {
        self.active.iter().map(Monitor::kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// One sampling pass over all active monitors, in display order.
    ///
    /// A monitor whose counter source fails contributes a per-metric error
    /// instead of aborting the pass; the other monitors still sample.
    pub fn sample_all(&mut self) -> Vec<(MetricKind, Result<Reading>)> {
        self.active
            .iter_mut()
            .map(|monitor| (monitor.kind(), monitor.sample()))
            .collect()
    }
}

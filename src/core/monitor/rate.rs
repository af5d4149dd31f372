//! Two-channel delta tracker over cumulative counters.

/// Tracks the last absolute reading of a pair of monotonic counters and
/// turns each new reading into a per-interval delta.
///
/// The baseline always moves to the current reading, so consecutive calls
/// measure consecutive intervals rather than cumulative-since-start. A
/// counter that regresses (reset, overflow, device hot-swap) clamps its
/// delta to zero instead of going negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateCounter {
    baseline_a: u64,
    baseline_b: u64,
}

impl RateCounter {
    pub fn new(baseline_a: u64, baseline_b: u64) -> Self {
        Self {
            baseline_a,
            baseline_b,
        }
    }

    /// Delta of both channels since the previous call.
    pub fn sample(&mut self, current_a: u64, current_b: u64) -> (u64, u64) {
        let delta = (
            current_a.saturating_sub(self.baseline_a),
            current_b.saturating_sub(self.baseline_b),
        );
        self.baseline_a = current_a;
        self.baseline_b = current_b;
        delta
    }

    pub fn baseline(&self) -> (u64, u64) {
        (self.baseline_a, self.baseline_b)
    }
}

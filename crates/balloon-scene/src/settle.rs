//! Settle retries: extra positioning passes at fixed delays after open and resize.
//!
//! Host layout can finalize after the callback that opened or resized the
//! balloon, so the first pass may measure stale rects. A couple of delayed
//! passes pick up the final metrics. This is a heuristic, not a guarantee:
//! layout that settles later than the last delay is not corrected.

use std::time::{Duration, Instant};

use balloon_config::SettleConfig;

/// Fixed delays, relative to the triggering event, at which a pass is re-run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlePolicy {
    delays: Vec<Duration>,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::new([Duration::from_millis(20), Duration::from_millis(150)])
    }
}

impl SettlePolicy {
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        let mut delays: Vec<Duration> = delays.into_iter().collect();
        delays.sort();
        Self { delays }
    }

    /// No retries; only the immediate pass runs.
    pub fn none() -> Self {
        Self { delays: Vec::new() }
    }

    pub fn from_config(config: &SettleConfig) -> Self {
        Self::new(config.delays_ms.iter().copied().map(Duration::from_millis))
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

/// Pending retry deadlines for one dialog.
///
/// Deadlines are dropped wholesale by [`SettleTimers::cancel`] when the dialog
/// closes, so a retry never outlives the open cycle that scheduled it.
#[derive(Debug, Default)]
pub struct SettleTimers {
    pending: Vec<Instant>,
}

impl SettleTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one deadline per policy delay, counted from `now`.
    pub fn schedule(&mut self, now: Instant, policy: &SettlePolicy) {
        self.pending.extend(policy.delays().iter().map(|d| now + *d));
        self.pending.sort();
    }

    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    /// Remove and count every deadline at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> usize {
        let due = self.pending.partition_point(|deadline| *deadline <= now);
        self.pending.drain(..due);
        due
    }

    /// Earliest pending deadline, for hosts that sleep until the next tick.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.first().copied()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

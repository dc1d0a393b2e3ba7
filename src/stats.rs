//! Running prediction counts shared by every request handler.
//!
//! The aggregator lives in the server state for the lifetime of the process.
//! Nothing is persisted; a restart starts from zero.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

/// Point-in-time copy of the aggregate counters.
///
/// `labels` and `counts` are parallel: `counts[i]` is the number of times
/// `labels[i]` was recorded. Labels keep first-recorded order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_uploads: u64,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub last_label: Option<String>,
}

impl Stats {
    fn record(&mut self, label: &str) {
        self.total_uploads += 1;
        self.last_label = Some(label.to_string());

        match self.labels.iter().position(|l| l == label) {
            Some(idx) => self.counts[idx] += 1,
            None => {
                self.labels.push(label.to_string());
                self.counts.push(1);
            }
        }
    }

    /// Count recorded for `label`, zero if it was never seen.
    pub fn count_for(&self, label: &str) -> u64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| self.counts[idx])
            .unwrap_or(0)
    }
}

/// Mutex-guarded aggregate of every recorded prediction label.
///
/// All mutations go through one lock, so concurrent handlers never lose an
/// update. Readers get a cloned [`Stats`] snapshot.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    inner: Mutex<Stats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one prediction outcome.
    pub fn record(&self, label: &str) {
        let mut stats = self.lock();
        stats.record(label);
        tracing::debug!(
            label,
            total_uploads = stats.total_uploads,
            "Recorded prediction"
        );
    }

    /// Clone the current counters.
    pub fn snapshot(&self) -> Stats {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave Stats half-updated in a way
    // that breaks its invariants, so a poisoned lock is simply reclaimed.
    fn lock(&self) -> MutexGuard<'_, Stats> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// Per-duration cache of expanded fee history
use crate::domain::fee_history::{ChartDuration, FeeHistory};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    /// When `data` was last replaced. `None` until the first successful refresh.
    pub updated_at: Option<Instant>,
    pub data: Arc<FeeHistory>,
}

/// Holds exactly one entry per [`ChartDuration`] for the lifetime of the cache.
#[derive(Debug)]
pub struct DurationCache {
    entries: HashMap<ChartDuration, CacheEntry>,
}

impl DurationCache {
    pub fn new() -> Self {
        let entries = ChartDuration::ALL
            .into_iter()
            .map(|duration| (duration, CacheEntry::default()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, duration: ChartDuration) -> &CacheEntry {
        // Every duration is inserted in `new` and entries are never removed
        &self.entries[&duration]
    }

    /// Empty data, or data older than `fresh_window`, is stale.
    pub fn is_stale(&self, duration: ChartDuration, now: Instant, fresh_window: Duration) -> bool {
        let entry = self.get(duration);
        if entry.data.is_empty() {
            return true;
        }

        match entry.updated_at {
            Some(updated_at) => now.saturating_duration_since(updated_at) > fresh_window,
            None => true,
        }
    }

    /// Replace the cached data for `duration` wholesale.
    pub fn put(&mut self, duration: ChartDuration, data: FeeHistory, now: Instant) {
        let entry = self.entries.entry(duration).or_default();
        entry.data = Arc::new(data);
        entry.updated_at = Some(entry.updated_at.map_or(now, |prev| prev.max(now)));
    }
}

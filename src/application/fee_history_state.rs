// Fee history view state - the cache, scheduler and error state behind the watcher
use crate::application::duration_cache::DurationCache;
use crate::application::refresh_scheduler::{RefreshInterval, RefreshScheduler};
use crate::domain::fee_history::{expand_data, ChartDuration, FeeHistory, FeeHistoryRaw};
use crate::error::RefreshError;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tokio::time::Instant;

/// What consumers see for the selected duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeHistoryView {
    pub duration: ChartDuration,
    /// `None` until the selected duration has been fetched at least once
    pub data: Option<Arc<FeeHistory>>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<RefreshError>,
}

fn serialize_error<S: Serializer>(
    error: &Option<RefreshError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Synchronous core of the watcher. Time is always passed in, so every
/// transition can be driven directly from tests.
#[derive(Debug)]
pub struct FeeHistoryState {
    cache: DurationCache,
    scheduler: RefreshScheduler,
    active: ChartDuration,
    data: Option<Arc<FeeHistory>>,
    error: Option<RefreshError>,
}

impl FeeHistoryState {
    pub fn new(active: ChartDuration) -> Self {
        Self {
            cache: DurationCache::new(),
            scheduler: RefreshScheduler::new(),
            active,
            data: None,
            error: None,
        }
    }

    pub fn active(&self) -> ChartDuration {
        self.active
    }

    pub fn interval(&self) -> RefreshInterval {
        self.scheduler.interval()
    }

    #[cfg(test)]
    pub fn cache(&self) -> &DurationCache {
        &self.cache
    }

    pub fn view(&self) -> FeeHistoryView {
        FeeHistoryView {
            duration: self.active,
            data: self.data.clone(),
            error: self.error.clone(),
        }
    }

    /// The duration to fetch now, if the active one is stale.
    pub fn due(&self, now: Instant) -> Option<ChartDuration> {
        let due = self.scheduler.is_due(&self.cache, self.active, now);
        tracing::debug!("Refresh check for {}: due={}", self.active, due);
        due.then_some(self.active)
    }

    /// Switch the active duration. Cached data for the new duration is
    /// surfaced straight away and the previous error is dropped.
    pub fn select(&mut self, duration: ChartDuration, now: Instant) -> Option<ChartDuration> {
        if duration == self.active {
            return None;
        }

        tracing::debug!("Switching fee history duration {} -> {}", self.active, duration);
        self.active = duration;
        self.error = None;

        let entry = self.cache.get(duration);
        self.data = if entry.data.is_empty() {
            None
        } else {
            Some(entry.data.clone())
        };

        self.due(now)
    }

    /// Apply the outcome of a fetch for `duration`.
    ///
    /// Outcomes for a duration that is no longer active only update its cache
    /// entry; the view and the interval follow the active duration alone.
    /// Returns `true` if the refresh interval changed.
    pub fn apply_outcome(
        &mut self,
        duration: ChartDuration,
        result: anyhow::Result<FeeHistoryRaw>,
        now: Instant,
    ) -> bool {
        let is_active = duration == self.active;
        let expanded = result
            .map_err(RefreshError::from)
            .and_then(|raw| expand_data(&raw));

        match expanded {
            Ok(history) => {
                tracing::info!(
                    "Refreshed fee history for {}: {} records",
                    duration,
                    history.len()
                );
                self.cache.put(duration, history, now);
                if !is_active {
                    return false;
                }
                self.data = Some(self.cache.get(duration).data.clone());
                self.error = None;
                self.scheduler.record_success()
            }
            Err(err) => {
                tracing::warn!("Fee history refresh for {} failed: {}", duration, err);
                if !is_active {
                    return false;
                }
                self.error = Some(err);
                self.scheduler.record_failure()
            }
        }
    }
}

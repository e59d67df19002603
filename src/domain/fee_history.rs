// Fee history domain models
use crate::error::RefreshError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window selector for the fee history chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartDuration {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl ChartDuration {
    pub const ALL: [ChartDuration; 3] = [
        ChartDuration::OneDay,
        ChartDuration::OneWeek,
        ChartDuration::OneMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartDuration::OneDay => "1d",
            ChartDuration::OneWeek => "1w",
            ChartDuration::OneMonth => "1m",
        }
    }
}

impl fmt::Display for ChartDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw fee samples as returned by the fee API.
///
/// `start` and `tick` are epoch milliseconds; sample `i` was taken at
/// `start + tick * i`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeHistoryRaw {
    pub start: i64,
    pub tick: i64,
    pub min: Vec<f64>,
    pub avg: Vec<f64>,
}

/// One chart point, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeRecord {
    pub date: String,
    pub min: f64,
    pub avg: f64,
}

pub type FeeHistory = Vec<FeeRecord>;

/// Expand raw samples into one record per sample index.
pub fn expand_data(raw: &FeeHistoryRaw) -> Result<FeeHistory, RefreshError> {
    if raw.min.len() != raw.avg.len() {
        return Err(RefreshError::MalformedSeries {
            min_len: raw.min.len(),
            avg_len: raw.avg.len(),
        });
    }

    raw.min
        .iter()
        .zip(&raw.avg)
        .enumerate()
        .map(|(index, (&min, &avg))| -> Result<FeeRecord, RefreshError> {
            let timestamp = sample_timestamp(raw, index)
                .ok_or(RefreshError::TimestampOutOfRange { index })?;
            Ok(FeeRecord {
                date: format_date_time(timestamp),
                min,
                avg,
            })
        })
        .collect()
}

/// `start + tick * index`, or `None` if it does not fit in an `i64`
fn sample_timestamp(raw: &FeeHistoryRaw, index: usize) -> Option<i64> {
    let index = i64::try_from(index).ok()?;
    raw.tick.checked_mul(index)?.checked_add(raw.start)
}

/// Format an epoch-millisecond timestamp as `YYYY-MM-DD HH:MM` (UTC)
pub fn format_date_time(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp_ms.to_string(),
    }
}

//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Days of history used for the trailing sales average
pub const DEFAULT_AVERAGE_WINDOW_DAYS: u32 = 30;

/// Sales older than this many days are pruned on save
pub const DEFAULT_HISTORY_RETENTION_DAYS: u32 = 90;

/// Days between placing and receiving a reorder
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 3;

/// Days of demand held as safety buffer
pub const DEFAULT_SAFETY_DAYS: u32 = 3;

/// Rows shown in the recent history table
pub const DEFAULT_RECENT_HISTORY_LIMIT: usize = 30;

/// Longest configurable averaging window or retention period (100 years)
pub const MAX_POLICY_DAYS: u32 = 36_500;

/// Parameters that drive the stock recommendation and history retention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StockPolicy {
    pub average_window_days: u32,
    pub history_retention_days: u32,
    pub lead_time_days: u32,
    pub safety_days: u32,
    pub recent_history_limit: usize,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            average_window_days: DEFAULT_AVERAGE_WINDOW_DAYS,
            history_retention_days: DEFAULT_HISTORY_RETENTION_DAYS,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            safety_days: DEFAULT_SAFETY_DAYS,
            recent_history_limit: DEFAULT_RECENT_HISTORY_LIMIT,
        }
    }
}

impl StockPolicy {
    /// Reject windows and retention periods nobody could mean
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.average_window_days > MAX_POLICY_DAYS {
            return Err("average_window_days exceeds 36500 days");
        }
        if self.history_retention_days > MAX_POLICY_DAYS {
            return Err("history_retention_days exceeds 36500 days");
        }
        Ok(())
    }
}

/// Date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

impl DateRange {
    /// Inclusive on both ends
    pub fn contains(&self, date: chrono::NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The `days`-day window ending on `today`, both ends included.
    /// Starts at `NaiveDate::MIN` when `days` reaches past it.
    pub fn trailing(today: chrono::NaiveDate, days: u32) -> Self {
        Self {
            start: days_before(today, days),
            end: today,
        }
    }
}

/// `today - days`, clamped to the earliest representable date
pub fn days_before(today: chrono::NaiveDate, days: u32) -> chrono::NaiveDate {
    today
        .checked_sub_signed(chrono::Duration::days(i64::from(days)))
        .unwrap_or(chrono::NaiveDate::MIN)
}

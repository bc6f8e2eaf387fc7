//! Lookback windows and the date-range predicate applied before analysis.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::record::TransactionRecord;

/// How far back a report looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "7D")]
    SevenDays,
    #[serde(rename = "30D")]
    #[default]
    ThirtyDays,
    #[serde(rename = "90D")]
    NinetyDays,
    #[serde(rename = "1Y")]
    OneYear,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
        Timeframe::NinetyDays,
        Timeframe::OneYear,
    ];

    /// Window length in days
    pub fn days(&self) -> u32 {
        match self {
            Timeframe::SevenDays => 7,
            Timeframe::ThirtyDays => 30,
            Timeframe::NinetyDays => 90,
            Timeframe::OneYear => 365,
        }
    }

    /// Short code used on the command line and in JSON
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::SevenDays => "7D",
            Timeframe::ThirtyDays => "30D",
            Timeframe::NinetyDays => "90D",
            Timeframe::OneYear => "1Y",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::SevenDays => "Last 7 Days",
            Timeframe::ThirtyDays => "Last 30 Days",
            Timeframe::NinetyDays => "Last 3 Months",
            Timeframe::OneYear => "Last Year",
        }
    }

    /// Inclusive `[now - days, now]` range
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(i64::from(self.days())), now)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    /// Accepts the short code ("30D", case-insensitive) or a bare day count ("30").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.code().eq_ignore_ascii_case(s) || tf.days().to_string() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown timeframe '{s}' (expected 7D, 30D, 90D or 1Y)"))
    }
}

/// Keep records dated inside the timeframe window ending at `now`, oldest first.
pub fn filter_window(
    records: &[TransactionRecord],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<TransactionRecord> {
    let (start, end) = timeframe.window(now);
    let mut out: Vec<TransactionRecord> = records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect();
    out.sort_by_key(|r| r.date);
    out
}

//! Calendar utilities: time-zone aware day and month bucketing.

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The calendar used to cut timestamps into days and months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarZone(pub Tz);

impl CalendarZone {
    /// Parse an IANA zone name like "America/Chicago".
    pub fn parse(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))?;
        Ok(Self(tz))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Local calendar day containing `ts`.
    pub fn day_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.0).date_naive()
    }

    /// First day of the local month containing `ts`.
    pub fn month_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        let day = self.day_of(ts);
        // Day 1 exists in every month
        day.with_day(1).unwrap_or(day)
    }

    /// Month label like "Aug 2025".
    pub fn month_label(month_start: NaiveDate) -> String {
        month_start.format("%b %Y").to_string()
    }

    /// Instant of local midnight at the start of `day`.
    ///
    /// If midnight falls in a DST gap, the wall time is read as UTC instead.
    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        let midnight = day.and_time(NaiveTime::MIN);
        match self.0.from_local_datetime(&midnight).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => self
                .0
                .from_utc_datetime(&midnight)
                .with_timezone(&Utc),
        }
    }
}

impl Default for CalendarZone {
    fn default() -> Self {
        Self(Tz::UTC)
    }
}

//! Parse ledger CSV exports into transaction records.
//!
//! Expected header (column order is free, extra columns are ignored):
//! date,amount,category,merchant,notes
//!
//! `date` is RFC 3339 or `YYYY-MM-DD` (local midnight in the given zone).
//! `amount` is signed: positive income, negative expense; `$` and `,` are tolerated.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tally_core::{CalendarZone, TransactionRecord};
use tracing::{info, warn};

use crate::error::{LedgerError, Result};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    amount: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    merchant: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Parse a CSV file, skipping rows whose date or amount can't be read.
pub fn import_csv(path: impl AsRef<Path>, zone: &CalendarZone) -> Result<Vec<TransactionRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| LedgerError::DataUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let records = parse_csv(file, zone)?;
    info!(path = %path.display(), count = records.len(), "csv imported");
    Ok(records)
}

pub fn parse_csv(reader: impl Read, zone: &CalendarZone) -> Result<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        // +2: header row and 1-based numbering
        let line = line + 2;

        let Some(date) = parse_date(&row.date, zone) else {
            warn!(line, date = %row.date, "skipping row with unreadable date");
            continue;
        };
        let Some(amount) = parse_amount(&row.amount) else {
            warn!(line, amount = %row.amount, "skipping row with unreadable amount");
            continue;
        };

        let mut record = TransactionRecord::new(amount, date);
        record.category = non_blank(row.category);
        record.merchant = non_blank(row.merchant);
        record.notes = non_blank(row.notes);
        out.push(record);
    }
    Ok(out)
}

/// RFC 3339 timestamp, or a plain `YYYY-MM-DD` taken as local midnight in `zone`
pub fn parse_date(s: &str, zone: &CalendarZone) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|day| zone.start_of_day(day))
}

fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|a| a.is_finite())
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

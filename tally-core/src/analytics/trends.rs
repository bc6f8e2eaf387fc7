//! Daily income/expense series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarZone;
use crate::record::TransactionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// One point of the daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub date: NaiveDate,
    /// Always positive; `kind` carries the direction
    pub amount: f64,
    pub kind: TransactionKind,
}

/// Per-day sums, expense row before income row, oldest day first.
/// Days (or sides of a day) with nothing to report produce no row.
pub fn generate_spending_trends(
    records: &[TransactionRecord],
    zone: &CalendarZone,
) -> Vec<SpendingTrend> {
    // day -> (expenses, income)
    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = days.entry(zone.day_of(r.date)).or_default();
        if r.is_expense() {
            entry.0 += r.abs_amount();
        } else if r.is_income() {
            entry.1 += r.amount;
        }
    }

    let mut trends = Vec::with_capacity(days.len() * 2);
    for (date, (expenses, income)) in days {
        if expenses > 0.0 {
            trends.push(SpendingTrend {
                date,
                amount: expenses,
                kind: TransactionKind::Expense,
            });
        }
        if income > 0.0 {
            trends.push(SpendingTrend {
                date,
                amount: income,
                kind: TransactionKind::Income,
            });
        }
    }
    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn test_groups_by_day_and_kind() {
        let records = vec![
            TransactionRecord::new(-20.0, Utc.with_ymd_and_hms(2025, 8, 2, 9, 0, 0).unwrap()),
            TransactionRecord::new(-5.0, Utc.with_ymd_and_hms(2025, 8, 2, 18, 0, 0).unwrap()),
            TransactionRecord::new(300.0, Utc.with_ymd_and_hms(2025, 8, 1, 8, 0, 0).unwrap()),
            TransactionRecord::new(-7.5, Utc.with_ymd_and_hms(2025, 8, 1, 23, 0, 0).unwrap()),
        ];

        let trends = generate_spending_trends(&records, &CalendarZone::default());
        assert_eq!(
            trends,
            vec![
                SpendingTrend { date: day(1), amount: 7.5, kind: TransactionKind::Expense },
                SpendingTrend { date: day(1), amount: 300.0, kind: TransactionKind::Income },
                SpendingTrend { date: day(2), amount: 25.0, kind: TransactionKind::Expense },
            ]
        );
    }

    #[test]
    fn test_income_only_day_yields_single_row() {
        let records = vec![
            TransactionRecord::new(100.0, Utc.with_ymd_and_hms(2025, 8, 3, 9, 0, 0).unwrap()),
            TransactionRecord::new(0.0, Utc.with_ymd_and_hms(2025, 8, 4, 9, 0, 0).unwrap()),
        ];
        let trends = generate_spending_trends(&records, &CalendarZone::default());
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].kind, TransactionKind::Income);
        assert!(trends.iter().all(|t| t.amount > 0.0));
    }

    #[test]
    fn test_day_boundary_follows_zone() {
        // 02:00 UTC Aug 5 is Aug 4 evening in Los Angeles
        let records = vec![TransactionRecord::new(
            -12.0,
            Utc.with_ymd_and_hms(2025, 8, 5, 2, 0, 0).unwrap(),
        )];
        let la = CalendarZone::parse("America/Los_Angeles").unwrap();
        assert_eq!(generate_spending_trends(&records, &la)[0].date, day(4));
        assert_eq!(
            generate_spending_trends(&records, &CalendarZone::default())[0].date,
            day(5)
        );
    }
}

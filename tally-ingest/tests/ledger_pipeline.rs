use chrono::{DateTime, Duration, TimeZone, Utc};
use tally_core::{analyze, AnalyticsConfig, CalendarZone, Timeframe};
use tally_ingest::{
    parse_csv, sample_transactions, JsonLedgerFile, Ledger, LedgerError, NewTransaction,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap()
}

const EXPORT: &str = "\
date,amount,category,merchant,notes
2025-08-01,3000.00,salary,Company Inc,Paycheck
2025-08-05,-120.00,groceries,Market,Weekly shop
2025-08-12,-45.50,food,Diner,Lunch
2025-08-18,-60.00,groceries,Market,Weekly shop
2024-12-24,-999.00,gifts,,Out of window
";

#[test]
fn test_csv_to_file_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let file = JsonLedgerFile::new(dir.path().join("nested").join("ledger.json"));

    let imported = parse_csv(EXPORT.as_bytes(), &CalendarZone::default()).unwrap();
    assert_eq!(imported.len(), 5);

    let mut ledger = file.load().unwrap();
    assert!(ledger.is_empty());
    assert_eq!(ledger.extend(imported.clone()), 5);
    assert_eq!(ledger.extend(imported), 0);
    // A second parse of the same export mints fresh ids but matches on content
    let reparsed = parse_csv(EXPORT.as_bytes(), &CalendarZone::default()).unwrap();
    assert_eq!(ledger.extend(reparsed), 0);
    assert_eq!(ledger.len(), 5);
    file.save(&ledger).unwrap();

    let reloaded = file.load().unwrap();
    assert_eq!(reloaded.len(), 5);

    let window = reloaded.records_in_window(Timeframe::ThirtyDays, now());
    assert_eq!(window.len(), 4);

    let report = analyze(&window, Timeframe::ThirtyDays, &AnalyticsConfig::default());
    assert_eq!(report.metrics.total_income, 3000.0);
    assert_eq!(report.metrics.total_spent, 225.5);
    assert_eq!(report.category_insights[0].category, "groceries");
    assert_eq!(report.category_insights[0].transaction_count, 2);
    assert_eq!(report.monthly_comparisons.len(), 1);
    assert_eq!(report.monthly_comparisons[0].month, "Aug 2025");
}

#[test]
fn test_seeded_ledger_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let file = JsonLedgerFile::new(dir.path().join("ledger.json"));

    let mut ledger = Ledger::new();
    for tx in sample_transactions(now()) {
        ledger.add(tx).unwrap();
    }
    file.save(&ledger).unwrap();

    let reloaded = file.load().unwrap();
    assert_eq!(reloaded.len(), ledger.len());
    assert_eq!(reloaded.balance(), ledger.balance());
    assert!(!reloaded.search("coffee").unwrap().is_empty());
}

#[test]
fn test_rejected_add_leaves_ledger_untouched() {
    let mut ledger = Ledger::new();
    let err = ledger
        .add(NewTransaction::new(0.0, "nothing", now() - Duration::days(1)))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidTransaction(_)));
    assert!(!err.is_retryable());
    assert!(ledger.is_empty());
}

#[test]
fn test_corrupt_file_is_retryable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonLedgerFile::new(&path).load().unwrap_err();
    assert!(matches!(err, LedgerError::DataUnavailable { .. }));
    assert!(err.is_retryable());
}

//! Demo transactions for trying the tool on an empty ledger.

use chrono::{DateTime, Duration, Utc};

use crate::ledger::NewTransaction;

/// (amount, description, category, merchant, days ago)
const SAMPLES: [(f64, &str, &str, &str, i64); 7] = [
    (-4.50, "Morning Coffee", "food", "Starbucks", 0),
    (-25.99, "Gas Station Fill-up", "transport", "Shell", 1),
    (-89.99, "Grocery Shopping", "food", "Whole Foods", 2),
    (2500.00, "Monthly Salary", "salary", "Company Inc", 3),
    (-45.00, "Phone Bill", "bills", "Verizon", 4),
    (-12.99, "Netflix Subscription", "entertainment", "Netflix", 5),
    (100.00, "Freelance Project", "income", "Client XYZ", 6),
];

/// The sample set, dated in the days leading up to `now`
pub fn sample_transactions(now: DateTime<Utc>) -> Vec<NewTransaction> {
    SAMPLES
        .iter()
        .map(|&(amount, description, category, merchant, days_ago)| {
            NewTransaction::new(amount, description, now - Duration::days(days_ago))
                .with_category(category)
                .with_merchant(merchant)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use chrono::TimeZone;
    use tally_core::{analyze, AnalyticsConfig, Timeframe};

    #[test]
    fn test_samples_are_valid_and_recent() {
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
        let mut ledger = Ledger::new();
        for tx in sample_transactions(now) {
            ledger.add(tx).unwrap();
        }
        assert_eq!(ledger.len(), 7);

        let week = ledger.records_in_window(Timeframe::SevenDays, now);
        assert_eq!(week.len(), 7);

        let report = analyze(&week, Timeframe::SevenDays, &AnalyticsConfig::default());
        assert_eq!(report.metrics.total_income, 2600.0);
        assert_eq!(report.category_insights[0].category, "food");
    }
}

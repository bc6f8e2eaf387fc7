//! In-memory ledger: validated edits, balances, search and the timeframe
//! window the analytics engine is fed from.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use serde::Serialize;
use tally_core::{filter_window, Timeframe, TransactionRecord};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{LedgerError, Result};

/// Largest magnitude accepted for a single transaction
pub const MAX_ABS_AMOUNT: f64 = 1_000_000.0;
/// Category given to new transactions that don't name one
pub const DEFAULT_CATEGORY: &str = "General";

/// Input for [`Ledger::add`]
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub merchant: Option<String>,
}

impl NewTransaction {
    pub fn new(amount: f64, description: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            amount,
            description: description.into(),
            category: None,
            date,
            merchant: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }
}

/// Partial update for [`Ledger::update`]; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub merchant: Option<String>,
}

/// Running totals over every record in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BalanceSummary {
    pub total_balance: f64,
    pub total_income: f64,
    /// Signed sum of expenses (<= 0)
    pub total_expenses: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate and append a transaction, returning its id
    pub fn add(&mut self, tx: NewTransaction) -> Result<Uuid> {
        validate(tx.amount, &tx.description)?;

        let category = normalize_category(tx.category);

        let mut record = TransactionRecord::new(tx.amount, tx.date)
            .with_category(category)
            .with_notes(tx.description.trim());
        record.merchant = tx.merchant;

        let id = record.id;
        info!(%id, amount = record.amount, "transaction added");
        self.records.push(record);
        Ok(id)
    }

    /// Append already-built records (imports), returning how many were new.
    ///
    /// A record is skipped when its id is known, or when the ledger already
    /// holds a record with the same date, amount, category, merchant and notes.
    /// Identical rows within one batch are matched one-for-one, so re-importing
    /// an export adds nothing while repeated rows in a fresh export all land.
    pub fn extend(&mut self, records: impl IntoIterator<Item = TransactionRecord>) -> usize {
        let mut existing: HashMap<ContentKey, usize> = HashMap::new();
        for r in &self.records {
            *existing.entry(ContentKey::of(r)).or_default() += 1;
        }

        let mut added = 0;
        for record in records {
            if self.get(record.id).is_some() {
                continue;
            }
            if let Some(n) = existing.get_mut(&ContentKey::of(&record)).filter(|n| **n > 0) {
                *n -= 1;
                debug!(id = %record.id, "skipping duplicate record");
                continue;
            }
            self.records.push(record);
            added += 1;
        }
        added
    }

    pub fn update(&mut self, id: Uuid, patch: TransactionPatch) -> Result<&TransactionRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::NotFound(id))?;

        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &patch.description {
            validate_description(description)?;
        }

        if let Some(amount) = patch.amount {
            record.amount = amount;
        }
        if let Some(description) = patch.description {
            record.notes = Some(description.trim().to_string());
        }
        if let Some(category) = patch.category {
            record.category = Some(normalize_category(Some(category)));
        }
        if let Some(date) = patch.date {
            record.date = date;
        }
        if let Some(merchant) = patch.merchant {
            record.merchant = Some(merchant);
        }

        info!(%id, "transaction updated");
        Ok(record)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<TransactionRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        info!(%id, "transaction deleted");
        Ok(self.records.remove(idx))
    }

    pub fn get(&self, id: Uuid) -> Option<&TransactionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records, newest first
    pub fn list(&self) -> Vec<&TransactionRecord> {
        let mut out: Vec<&TransactionRecord> = self.records.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    /// Case-insensitive regex match over notes, merchant and category, newest first
    pub fn search(&self, pattern: &str) -> Result<Vec<&TransactionRecord>> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self
            .list()
            .into_iter()
            .filter(|r| {
                [&r.notes, &r.merchant, &r.category]
                    .into_iter()
                    .flatten()
                    .any(|field| re.is_match(field))
            })
            .collect())
    }

    pub fn balance(&self) -> BalanceSummary {
        let total_income: f64 = self
            .records
            .iter()
            .filter(|r| r.is_income())
            .map(|r| r.amount)
            .sum();
        let total_expenses: f64 = self
            .records
            .iter()
            .filter(|r| r.is_expense())
            .map(|r| r.amount)
            .sum();
        BalanceSummary {
            total_balance: self.records.iter().map(|r| r.amount).sum(),
            total_income,
            total_expenses,
            transaction_count: self.records.len(),
        }
    }

    /// Records inside `timeframe` ending at `now`, oldest first
    pub fn records_in_window(&self, timeframe: Timeframe, now: DateTime<Utc>) -> Vec<TransactionRecord> {
        filter_window(&self.records, timeframe, now)
    }
}

/// Reject zero, out-of-range or undescribed transactions
pub fn validate(amount: f64, description: &str) -> Result<()> {
    validate_amount(amount)?;
    validate_description(description)
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount == 0.0 || !amount.is_finite() {
        return Err(LedgerError::InvalidTransaction(
            "amount must be a non-zero number".to_string(),
        ));
    }
    if amount.abs() >= MAX_ABS_AMOUNT {
        return Err(LedgerError::InvalidTransaction(format!(
            "amount must be below {MAX_ABS_AMOUNT} in magnitude"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::InvalidTransaction(
            "description must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Missing or blank categories become [`DEFAULT_CATEGORY`]
fn normalize_category(category: Option<String>) -> String {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Fields that identify the same real-world transaction across imports
#[derive(Debug, PartialEq, Eq, Hash)]
struct ContentKey {
    date: DateTime<Utc>,
    amount_bits: u64,
    category: Option<String>,
    merchant: Option<String>,
    notes: Option<String>,
}

impl ContentKey {
    fn of(r: &TransactionRecord) -> Self {
        Self {
            date: r.date,
            amount_bits: r.amount.to_bits(),
            category: r.category.clone(),
            merchant: r.merchant.clone(),
            notes: r.notes.clone(),
        }
    }
}

//! Transaction record: the immutable input fact every report is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when a record carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A single ledger entry as handed to the analytics engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Stable identifier, used by the ledger for edits
    pub id: Uuid,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// When the transaction happened (UTC instant)
    pub date: DateTime<Utc>,
    /// Free-form category name
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    /// User description of the transaction
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransactionRecord {
    /// Create a record with a fresh id and no optional fields
    pub fn new(amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            category: None,
            merchant: None,
            notes: None,
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

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Category name used for grouping
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

//! tally-ingest: the ledger that feeds the analytics engine, plus JSON file
//! storage and CSV import.

pub mod csv_import;
pub mod error;
pub mod ledger;
pub mod sample;
pub mod store;

pub use csv_import::{import_csv, parse_csv, parse_date};
pub use error::{LedgerError, Result};
pub use ledger::{BalanceSummary, Ledger, NewTransaction, TransactionPatch};
pub use sample::sample_transactions;
pub use store::JsonLedgerFile;

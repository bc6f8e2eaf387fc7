//! JSON ledger file: a pretty-printed array of transaction records.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tally_core::TransactionRecord;
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;

#[derive(Debug, Clone)]
pub struct JsonLedgerFile {
    path: PathBuf,
}

impl JsonLedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger; a missing file is an empty ledger.
    pub fn load(&self) -> Result<Ledger> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file yet");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(self.unavailable(e)),
        };

        let records: Vec<TransactionRecord> =
            serde_json::from_str(&text).map_err(|e| self.unavailable(e))?;
        debug!(path = %self.path.display(), count = records.len(), "ledger loaded");
        Ok(Ledger::from_records(records))
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger.records()).map_err(|e| self.write_failed(e))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.write_failed(e))?;
        }
        fs::write(&self.path, json).map_err(|e| self.write_failed(e))?;

        info!(path = %self.path.display(), count = ledger.len(), "ledger saved");
        Ok(())
    }

    fn unavailable(&self, e: impl std::fmt::Display) -> LedgerError {
        LedgerError::DataUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }

    fn write_failed(&self, e: impl std::fmt::Display) -> LedgerError {
        LedgerError::PersistenceWriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewTransaction;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonLedgerFile::new(dir.path().join("ledger.json"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonLedgerFile::new(dir.path().join("nested").join("ledger.json"));

        let mut ledger = Ledger::new();
        let at = Utc.with_ymd_and_hms(2025, 8, 13, 9, 30, 0).unwrap();
        let id = ledger
            .add(NewTransaction::new(-25.99, "Gas Station Fill-up", at).with_merchant("Shell"))
            .unwrap();
        file.save(&ledger).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded.records(), ledger.records());
        assert_eq!(loaded.get(id).unwrap().merchant.as_deref(), Some("Shell"));
    }

    #[test]
    fn test_corrupt_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonLedgerFile::new(&path).load().unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, LedgerError::DataUnavailable { .. }));
    }

    #[test]
    fn test_unwritable_target_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file
        let err = JsonLedgerFile::new(dir.path()).save(&Ledger::new()).unwrap_err();
        assert!(matches!(err, LedgerError::PersistenceWriteFailed { .. }));
        assert!(!err.is_retryable());
    }
}

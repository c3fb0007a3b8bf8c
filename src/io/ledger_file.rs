//! Append-only ledger file
//!
//! The backing store is a flat text file of account records (see
//! [`record_format`](crate::io::record_format)). Every committed change is
//! appended as a fresh record; older records for the same id stay in the
//! file until it is compacted.
//!
//! # Durability
//!
//! - The file is opened, appended to and closed on every write; no handle is
//!   held between operations.
//! - A batch of records is encoded into one buffer and written with a single
//!   `write_all` followed by `sync_data`, so a transfer's debit and credit
//!   land together.
//! - Compaction writes a full snapshot to a temporary file in the same
//!   directory and renames it over the ledger.
//!
//! # Limitations
//!
//! There is no locking. Two processes appending to the same file interleave
//! at record granularity and neither sees the other's updates.

use crate::core::traits::RecordLog;
use crate::io::record_format::{decode_record, encode_records};
use crate::types::{Account, BankError};
use csv::ReaderBuilder;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Ledger stored as a newline-separated text file
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LedgerFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl RecordLog for LedgerFile {
    fn read_all(&self) -> Result<Vec<Account>, BankError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        // Fields are split on raw commas and kept verbatim
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(file);

        let mut accounts = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|pos| pos.line());
            accounts.push(decode_record(&row, line)?);
        }

        debug!(
            path = %self.path.display(),
            records = accounts.len(),
            "read ledger file"
        );
        Ok(accounts)
    }

    fn append(&mut self, accounts: &[&Account]) -> Result<(), BankError> {
        if accounts.is_empty() {
            return Ok(());
        }

        let buffer = encode_records(accounts)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&buffer)?;
        file.sync_data()?;

        debug!(
            path = %self.path.display(),
            records = accounts.len(),
            "appended records"
        );
        Ok(())
    }

    fn replace(&mut self, accounts: &[&Account]) -> Result<(), BankError> {
        let buffer = encode_records(accounts)?;

        let mut snapshot = NamedTempFile::new_in(self.directory())?;
        snapshot.write_all(&buffer)?;
        snapshot.as_file().sync_data()?;
        snapshot
            .persist(&self.path)
            .map_err(|e| BankError::from(e.error))?;

        debug!(
            path = %self.path.display(),
            records = accounts.len(),
            "replaced ledger file"
        );
        Ok(())
    }
}

//! I/O module
//!
//! Handles the persisted account records.
//!
//! # Components
//!
//! - `record_format` - Record format handling (line encoding, decoding, amount parsing)
//! - `ledger_file` - Append-only text file backing store

pub mod ledger_file;
pub mod record_format;

pub use ledger_file::LedgerFile;
pub use record_format::{decode_record, encode_records, parse_amount, LedgerRecord};

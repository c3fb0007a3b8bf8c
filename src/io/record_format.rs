//! Persisted record format
//!
//! One account record per line, four comma-separated fields, no header and
//! no quoting:
//!
//! ```text
//! <id>,<credentialDigest>,<kind>,<balance>
//! ```
//!
//! This module centralizes the format: converting records to and from
//! accounts, encoding batches of records, and parsing decimal amounts. All
//! functions are pure (no file I/O) for easy testing.

use crate::types::{Account, AccountKind, BankError};
use csv::{QuoteStyle, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of fields in every record
pub const FIELD_COUNT: usize = 4;

/// Raw record as it appears on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: String,
    pub digest: String,
    pub kind: String,
    pub balance: String,
}

impl From<&Account> for LedgerRecord {
    fn from(account: &Account) -> Self {
        LedgerRecord {
            id: account.id().to_string(),
            digest: account.credential_digest().to_string(),
            kind: account.kind().as_str().to_string(),
            balance: account.balance().to_string(),
        }
    }
}

/// Parse a decimal amount in fixed (`12.50`) or exponential (`1.25e1`) form
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Convert one raw CSV row into an Account
///
/// # Arguments
///
/// * `row` - The raw row as read from the backing store
/// * `line` - Line number, used in error messages
///
/// # Errors
///
/// Returns `MalformedRecord` if:
/// - The row does not have exactly four fields
/// - The balance is not a decimal number
/// - The balance is negative
pub fn decode_record(row: &StringRecord, line: Option<u64>) -> Result<Account, BankError> {
    if row.len() != FIELD_COUNT {
        return Err(BankError::malformed_record(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, row.len()),
        ));
    }

    let record: LedgerRecord = row.deserialize(None)?;

    let balance = parse_amount(&record.balance).ok_or_else(|| {
        BankError::malformed_record(line, format!("invalid balance '{}'", record.balance))
    })?;

    if balance < Decimal::ZERO {
        return Err(BankError::malformed_record(
            line,
            format!("negative balance '{}'", record.balance),
        ));
    }

    // Leading whitespace belongs to the line, not the id
    Ok(Account::from_parts(
        record.id.trim_start().to_string(),
        record.digest,
        AccountKind::from_label(&record.kind),
        balance,
    ))
}

/// Encode accounts as consecutive newline-terminated records
///
/// The result is a single buffer so that callers can write a whole batch
/// with one append.
pub fn encode_records(accounts: &[&Account]) -> Result<Vec<u8>, BankError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for account in accounts {
        writer.serialize(LedgerRecord::from(*account))?;
    }

    writer
        .into_inner()
        .map_err(|e| BankError::Io {
            message: format!("Failed to flush records: {}", e.error()),
        })
}

//! Core traits for the ledger's collaborators
//!
//! The account store depends on three seams: how secrets are hashed, how
//! fresh account ids are drawn, and where records are persisted. Each is a
//! trait so tests can substitute deterministic or in-memory implementations.

use crate::types::{Account, AccountId, BankError};

/// One-way transform from a plaintext secret to a fixed-length digest
///
/// Digests are only ever compared for equality.
pub trait CredentialHasher {
    /// Hash a plaintext secret into its textual digest
    fn hash(&self, secret: &str) -> String;

    /// Check whether `candidate` hashes to `digest`
    fn matches(&self, candidate: &str, digest: &str) -> bool {
        self.hash(candidate) == digest
    }
}

/// Source of candidate account ids
///
/// Generators are not required to produce unique values; the store checks
/// for collisions and asks again.
pub trait IdGenerator {
    fn next_id(&mut self) -> AccountId;
}

/// Append-only persistence of account records
///
/// Records are appended in the order the store commits them. Reading the log
/// back yields every record in that same order, stale ones included; callers
/// resolve duplicates.
pub trait RecordLog {
    /// Read every persisted record, oldest first
    ///
    /// A missing backing store yields an empty list.
    fn read_all(&self) -> Result<Vec<Account>, BankError>;

    /// Append the given records as one write
    ///
    /// Either all records reach the log or the call fails.
    fn append(&mut self, accounts: &[&Account]) -> Result<(), BankError>;

    /// Replace the whole log with exactly the given records
    fn replace(&mut self, accounts: &[&Account]) -> Result<(), BankError>;
}

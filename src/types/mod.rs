//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `account`: the Account entity, its identifier and kind
//! - `error`: error types for the ledger core

pub mod account;
pub mod error;

pub use account::{Account, AccountId, AccountKind};
pub use error::BankError;

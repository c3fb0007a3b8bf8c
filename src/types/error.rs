//! Error types for the terminal bank
//!
//! This module defines every error the ledger core can report.
//!
//! # Error Categories
//!
//! - **Session errors**: authentication failure, unknown recipient or account.
//!   These are recovered at the shell boundary and reported once.
//! - **Balance errors**: insufficient funds, invalid amounts, overflow.
//!   The account is left untouched.
//! - **Storage errors**: malformed persisted records and I/O failures. A load
//!   failure is fatal at startup.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Unknown account id or wrong secret on login
    ///
    /// Carries no detail so that both causes are indistinguishable.
    #[error("Invalid account number or password")]
    Authentication,

    /// Withdrawal (direct or via transfer) exceeds the balance
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: String,
        balance: Decimal,
        requested: Decimal,
    },

    /// Transfer target does not exist
    #[error("Receiving account {account} does not exist")]
    UnknownRecipient { account: String },

    /// An operation addressed an account id the store does not hold
    #[error("Account {account} not found")]
    AccountNotFound { account: String },

    /// Negative amount passed to deposit, withdraw or transfer
    #[error("Invalid amount '{amount}': amounts must not be negative")]
    InvalidAmount { amount: String },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow { operation: String, account: String },

    /// A persisted record could not be parsed
    ///
    /// This is fatal at load time: the store refuses to start with a partially
    /// loaded ledger.
    #[error("Malformed record{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    MalformedRecord {
        /// Line number where the record starts (if available)
        line: Option<u64>,
        message: String,
    },

    /// No free account id could be drawn within the retry budget
    #[error("Could not allocate a free account number after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },

    /// I/O error while reading or writing the backing store
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return BankError::Io {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        BankError::MalformedRecord {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    pub fn unknown_recipient(account: &str) -> Self {
        BankError::UnknownRecipient {
            account: account.to_string(),
        }
    }

    pub fn account_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
        }
    }

    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    pub fn malformed_record(line: Option<u64>, message: impl Into<String>) -> Self {
        BankError::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Whether the shell can report this error and carry on
    ///
    /// Storage errors are not recoverable in-session: the durable log may no
    /// longer match memory.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BankError::MalformedRecord { .. } | BankError::Io { .. })
    }
}

//! Terminal Bank Library
//! # Overview
//!
//! This library provides a small single-user bank ledger: accounts with
//! hashed credentials and decimal balances, persisted to an append-only flat
//! file, driven by an interactive terminal shell.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountKind, BankError)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Store configuration
//! - [`core`] - Ledger logic:
//!   - [`core::account_store`] - Account ownership, authentication and transfers
//!   - [`core::credential`] - Credential hashing
//!   - [`core::id_generator`] - Account number generation
//! - [`io`] - The persisted record format and ledger file
//! - [`shell`] - Interactive menus
//! - [`logging`] - Log subscriber setup
//!
//! # Operations
//!
//! - **Open account**: draw a free five-digit number, start at a zero balance
//! - **Login**: an unknown number and a wrong password fail the same way
//! - **Deposit** / **Withdraw**: a withdrawal never takes the balance below zero
//! - **Transfer**: debit then credit, both records appended in one write
//!
//! # Persistence
//!
//! Each committed change appends a `<id>,<digest>,<kind>,<balance>` line. On
//! startup the file is replayed in order and the last line for each id wins.
//! A malformed line aborts startup.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod logging;
pub mod shell;
pub mod types;

pub use config::StoreConfig;
pub use crate::core::{AccountStore, CredentialHasher, IdGenerator, RecordLog};
pub use io::LedgerFile;
pub use shell::Shell;
pub use types::{Account, AccountId, AccountKind, BankError};

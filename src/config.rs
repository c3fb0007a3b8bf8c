//! Store configuration

use crate::core::id_generator::DEFAULT_ID_RANGE;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Default backing file, relative to the working directory
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";

/// Default number of draws before account creation gives up
pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 100;

/// Configuration for opening an [`AccountStore`](crate::core::AccountStore)
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Path of the ledger file
    pub accounts_file: PathBuf,

    /// Range new account ids are drawn from
    pub id_range: RangeInclusive<u32>,

    /// Draws attempted before reporting the id space as exhausted
    pub max_id_attempts: usize,
}

impl StoreConfig {
    /// Create a config for the given file with default id settings
    ///
    /// A zero `max_id_attempts` falls back to the default.
    pub fn new(accounts_file: impl Into<PathBuf>, max_id_attempts: usize) -> Self {
        let max_id_attempts = if max_id_attempts == 0 {
            DEFAULT_MAX_ID_ATTEMPTS
        } else {
            max_id_attempts
        };

        StoreConfig {
            accounts_file: accounts_file.into(),
            id_range: DEFAULT_ID_RANGE,
            max_id_attempts,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_ACCOUNTS_FILE, DEFAULT_MAX_ID_ATTEMPTS)
    }
}

use crate::config::{StoreConfig, DEFAULT_ACCOUNTS_FILE, DEFAULT_MAX_ID_ATTEMPTS};
use clap::Parser;
use std::path::PathBuf;

/// Interactive terminal bank backed by a flat account file
#[derive(Parser, Debug)]
#[command(name = "terminal-bank")]
#[command(about = "Interactive terminal bank backed by a flat account file", long_about = None)]
pub struct CliArgs {
    /// Path of the account ledger file
    #[arg(
        long = "accounts-file",
        value_name = "PATH",
        default_value = DEFAULT_ACCOUNTS_FILE,
        help = "Path to the account ledger file (created on first write)"
    )]
    pub accounts_file: PathBuf,

    /// Rewrite the ledger with one record per account before starting
    #[arg(long = "compact", help = "Compact the ledger file after loading it")]
    pub compact: bool,

    /// Number of id draws before account creation gives up
    #[arg(
        long = "max-id-attempts",
        value_name = "COUNT",
        help = "Account number draws before giving up (default: 100)"
    )]
    pub max_id_attempts: Option<usize>,

    /// Log filter directive, e.g. `info` or `terminal_bank=debug`
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        help = "Log level or filter directive (default: RUST_LOG, else warn)"
    )]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Create a StoreConfig from CLI arguments
    ///
    /// A missing or zero `--max-id-attempts` falls back to the default.
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.accounts_file.clone(),
            self.max_id_attempts.unwrap_or(DEFAULT_MAX_ID_ATTEMPTS),
        )
    }
}

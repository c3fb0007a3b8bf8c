//! Terminal Bank CLI
//!
//! Interactive banking over a flat account file.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --accounts-file ledger.txt
//! cargo run -- --compact --log-level info
//! ```
//!
//! The program loads the ledger file (a missing file means no accounts yet),
//! then runs the interactive menus on stdin/stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Normal exit from the menu or end of input
//! - 1: The ledger could not be loaded or compacted, or the terminal failed

use std::io;
use std::process;
use terminal_bank::{cli, logging, AccountStore, Shell};

fn main() {
    let args = cli::parse_args();
    logging::init(args.log_level.as_deref());

    let config = args.to_store_config();

    // A partially loaded ledger is never used
    let mut store = match AccountStore::open(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: failed to load {}: {}", config.accounts_file.display(), e);
            process::exit(1);
        }
    };

    if args.compact {
        if let Err(e) = store.compact() {
            eprintln!("Error: failed to compact {}: {}", config.accounts_file.display(), e);
            process::exit(1);
        }
    }

    let stdin = io::stdin();
    let mut shell = Shell::new(&mut store, stdin.lock(), io::stdout());
    if let Err(e) = shell.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

//! End-to-end integration tests
//!
//! These tests drive the ledger through its public API and the interactive
//! shell against real files in temporary directories.
//!
//! Ledger fixtures are located in tests/fixtures/. Each fixture directory
//! holds an `accounts.txt` ledger and, when it is expected to load, an
//! `expected.txt` with the compacted result (one record per account, sorted
//! by id).

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use std::str::FromStr;
    use tempfile::TempDir;
    use terminal_bank::{AccountKind, AccountStore, BankError, LedgerFile, Shell, StoreConfig};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Copy a fixture ledger into a fresh temporary directory
    fn fixture_ledger(fixture_name: &str, dir: &TempDir) -> PathBuf {
        let input_path = format!("tests/fixtures/{}/accounts.txt", fixture_name);
        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let ledger_path = dir.path().join("accounts.txt");
        fs::copy(&input_path, &ledger_path).expect("Failed to copy fixture");
        ledger_path
    }

    fn open(path: &Path) -> AccountStore<LedgerFile> {
        AccountStore::open(&StoreConfig::new(path, 0))
            .unwrap_or_else(|e| panic!("Failed to open {}: {}", path.display(), e))
    }

    fn run_shell(store: &mut AccountStore<LedgerFile>, script: &str) -> String {
        let mut output = Vec::new();
        Shell::new(store, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .expect("Shell failed");
        String::from_utf8(output).expect("Shell output is not UTF-8")
    }

    /// Load a fixture ledger, compact it and compare with expected.txt
    #[rstest]
    #[case("superseded_records")]
    #[case("unknown_kind")]
    #[case("exponent_balance")]
    #[case("blank_lines")]
    #[case("padded_kind")]
    fn test_fixtures_compact_to_expected(#[case] fixture: &str) {
        let dir = TempDir::new().unwrap();
        let ledger_path = fixture_ledger(fixture, &dir);

        let mut store = open(&ledger_path);
        store.compact().expect("Failed to compact");

        let actual_output = fs::read_to_string(&ledger_path).unwrap();
        let expected_path = format!("tests/fixtures/{}/expected.txt", fixture);
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nLedger mismatch for fixture: {}\n\nActual:\n{}\n\nExpected:\n{}\n",
            fixture, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("malformed_field_count", Some(2))]
    #[case("malformed_balance", Some(2))]
    #[case("negative_balance", Some(1))]
    #[case("quoted_comma", Some(2))]
    fn test_malformed_fixtures_fail_to_load(#[case] fixture: &str, #[case] line: Option<u64>) {
        let dir = TempDir::new().unwrap();
        let ledger_path = fixture_ledger(fixture, &dir);

        let result = AccountStore::open(&StoreConfig::new(&ledger_path, 0));

        match result {
            Err(BankError::MalformedRecord { line: actual, .. }) => assert_eq!(actual, line),
            Err(other) => panic!("Expected MalformedRecord, got {}", other),
            Ok(_) => panic!("Fixture {} loaded but should have failed", fixture),
        }
    }

    #[test]
    fn test_superseded_records_resolve_last_wins() {
        let dir = TempDir::new().unwrap();
        let store = open(&fixture_ledger("superseded_records", &dir));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("12345").unwrap().balance(), dec("50.0"));
        assert!(store.authenticate("12345", "pass1").is_ok());
        assert!(store.authenticate("54321", "pass2").is_ok());
        assert_eq!(
            store.authenticate("54321", "pass1").unwrap_err(),
            BankError::Authentication
        );
    }

    #[test]
    fn test_missing_ledger_starts_empty_and_is_created_on_first_write() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");

        let mut store = open(&ledger_path);
        assert!(store.is_empty());
        assert!(!ledger_path.exists());

        store.create_account(AccountKind::Personal, "pass1").unwrap();
        assert_eq!(fs::read_to_string(&ledger_path).unwrap().lines().count(), 1);
    }

    /// Create, deposit, overdraw, transfer; then reload from scratch
    #[test]
    fn test_concrete_banking_scenario() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);

        let first = store
            .create_account(AccountKind::Personal, "pass1")
            .unwrap()
            .id()
            .to_string();
        assert_eq!(store.get(&first).unwrap().balance(), dec("0.00"));

        assert_eq!(store.deposit(&first, dec("100.00")).unwrap(), dec("100.00"));

        let overdraw = store.withdraw(&first, dec("150.00"));
        assert!(matches!(overdraw, Err(BankError::InsufficientFunds { .. })));
        assert_eq!(store.get(&first).unwrap().balance(), dec("100.00"));

        let second = store
            .create_account(AccountKind::Business, "pass2")
            .unwrap()
            .id()
            .to_string();
        store.deposit(&second, dec("0")).unwrap();

        store.transfer(&first, &second, dec("50.00")).unwrap();
        assert_eq!(store.get(&first).unwrap().balance(), dec("50.00"));
        assert_eq!(store.get(&second).unwrap().balance(), dec("50.00"));

        let reloaded = open(&ledger_path);
        for id in [&first, &second] {
            assert_eq!(reloaded.get(id), store.get(id), "account {} differs", id);
        }
    }

    #[test]
    fn test_transfer_appends_both_records_together() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);
        let from = store
            .create_account(AccountKind::Personal, "a")
            .unwrap()
            .id()
            .to_string();
        let to = store
            .create_account(AccountKind::Business, "b")
            .unwrap()
            .id()
            .to_string();
        store.deposit(&from, dec("20")).unwrap();

        store.transfer(&from, &to, dec("5")).unwrap();

        let contents = fs::read_to_string(&ledger_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with(&format!("{},", from)));
        assert!(lines[3].ends_with(",Personal,15"));
        assert!(lines[4].starts_with(&format!("{},", to)));
        assert!(lines[4].ends_with(",Business,5"));
    }

    #[test]
    fn test_failed_transfer_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);
        let from = store
            .create_account(AccountKind::Personal, "a")
            .unwrap()
            .id()
            .to_string();
        let to = store
            .create_account(AccountKind::Business, "b")
            .unwrap()
            .id()
            .to_string();
        let before = fs::read_to_string(&ledger_path).unwrap();

        assert!(store.transfer(&from, &to, dec("1")).is_err());
        assert!(store.transfer(&from, "00000", dec("0")).is_err());

        assert_eq!(fs::read_to_string(&ledger_path).unwrap(), before);
    }

    /// Random deposits and withdrawals never leave a negative balance, and
    /// the reloaded ledger matches memory
    #[test]
    fn test_random_operations_keep_balances_non_negative() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);
        let mut rng = StdRng::seed_from_u64(2024);

        let ids: Vec<String> = (0..3)
            .map(|i| {
                let kind = if i % 2 == 0 {
                    AccountKind::Personal
                } else {
                    AccountKind::Business
                };
                store.create_account(kind, "pw").unwrap().id().to_string()
            })
            .collect();

        for _ in 0..200 {
            let id = &ids[rng.gen_range(0..ids.len())];
            let amount = Decimal::new(rng.gen_range(0..10_000), 2);
            let before = store.get(id).unwrap().balance();

            match rng.gen_range(0..3) {
                0 => {
                    store.deposit(id, amount).unwrap();
                }
                1 => match store.withdraw(id, amount) {
                    Ok(_) => assert!(amount <= before),
                    Err(BankError::InsufficientFunds { .. }) => {
                        assert!(amount > before);
                        assert_eq!(store.get(id).unwrap().balance(), before);
                    }
                    Err(other) => panic!("Unexpected error: {}", other),
                },
                _ => {
                    let to = &ids[rng.gen_range(0..ids.len())];
                    let _ = store.transfer(id, to, amount);
                }
            }

            assert!(ids
                .iter()
                .all(|id| store.get(id).unwrap().balance() >= Decimal::ZERO));
        }

        let reloaded = open(&ledger_path);
        for id in &ids {
            assert_eq!(reloaded.get(id), store.get(id));
        }
    }

    /// Scripted session through the shell, followed by a reload
    #[test]
    fn test_shell_session_persists_changes() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);
        let first = store
            .create_account(AccountKind::Personal, "pass1")
            .unwrap()
            .id()
            .to_string();
        let second = store
            .create_account(AccountKind::Business, "pass2")
            .unwrap()
            .id()
            .to_string();

        let script = format!(
            "2\n{first}\npass1\n\
             2\n100.00\n\
             3\n150.00\n\
             4\n{second}\n50.00\n\
             4\n00000\n1\n\
             1\n\
             5\n\
             2\n{second}\nwrong\n\
             3\n"
        );
        let output = run_shell(&mut store, &script);

        assert!(output.contains("Welcome, Personal account holder!"));
        assert!(output.contains("Deposited successfully. New balance: 100.00"));
        assert!(output.contains("Insufficient funds in account"));
        assert!(output.contains("Transferred successfully. New balance: 50.00"));
        assert!(output.contains("Receiving account 00000 does not exist"));
        assert!(output.contains("Your balance is: 50.00"));
        assert!(output.contains("Logged out successfully."));
        assert!(output.contains("Invalid account number or password"));
        assert!(output.ends_with("Thank you for using Terminal Bank. Goodbye!\n"));

        let reloaded = open(&ledger_path);
        assert_eq!(reloaded.get(&first).unwrap().balance(), dec("50.00"));
        assert_eq!(reloaded.get(&second).unwrap().balance(), dec("50.00"));
    }

    #[test]
    fn test_shell_opens_account_that_survives_restart() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);

        run_shell(&mut store, "1\nBusiness\ns3cret\n3\n");

        let reloaded = open(&ledger_path);
        let account = reloaded.accounts()[0].clone();
        assert_eq!(account.kind(), AccountKind::Business);
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(reloaded.authenticate(account.id(), "s3cret").is_ok());
    }

    #[test]
    fn test_compaction_preserves_state() {
        let dir = TempDir::new().unwrap();
        let ledger_path = dir.path().join("accounts.txt");
        let mut store = open(&ledger_path);
        let id = store
            .create_account(AccountKind::Personal, "pw")
            .unwrap()
            .id()
            .to_string();
        for _ in 0..10 {
            store.deposit(&id, dec("1.10")).unwrap();
        }
        assert_eq!(fs::read_to_string(&ledger_path).unwrap().lines().count(), 11);

        assert_eq!(store.compact().unwrap(), 1);

        assert_eq!(fs::read_to_string(&ledger_path).unwrap().lines().count(), 1);
        let reloaded = open(&ledger_path);
        assert_eq!(reloaded.get(&id), store.get(&id));
        assert_eq!(reloaded.get(&id).unwrap().balance(), dec("11.00"));
    }
}

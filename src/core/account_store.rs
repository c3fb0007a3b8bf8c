//! Account store
//!
//! This module provides the `AccountStore`, the ledger core. It owns every
//! account in memory, keyed by id, and writes each committed change to an
//! append-only [`RecordLog`].
//!
//! The AccountStore is responsible for:
//! - Loading accounts at startup, resolving repeated records last-wins
//! - Creating accounts with collision-checked ids
//! - Authenticating sessions
//! - Deposits, withdrawals and transfers, persisted as they are committed
//! - Compacting the log down to one record per account
//!
//! # Commit order
//!
//! Every mutating operation works on copies of the affected accounts. The
//! copies are appended to the log first and only replace the in-memory entries
//! once the append succeeded, so a failed write leaves memory matching the
//! durable log. A transfer appends both of its records in one write.

use crate::config::StoreConfig;
use crate::core::credential::Sha256Hasher;
use crate::core::id_generator::RandomIdGenerator;
use crate::core::traits::{CredentialHasher, IdGenerator, RecordLog};
use crate::io::LedgerFile;
use crate::types::{Account, AccountId, AccountKind, BankError};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Read every record from the log and fold it into an id-keyed map
///
/// Records are applied in log order, so for ids that appear more than once
/// the last record wins.
///
/// # Errors
///
/// Propagates the log's read error; a single malformed record fails the
/// whole load.
pub fn load_accounts<L>(log: &L) -> Result<HashMap<AccountId, Account>, BankError>
where
    L: RecordLog + ?Sized,
{
    let records = log.read_all()?;
    let total = records.len();

    let mut accounts = HashMap::with_capacity(total);
    for account in records {
        accounts.insert(account.id().to_string(), account);
    }

    debug!(
        records = total,
        accounts = accounts.len(),
        superseded = total - accounts.len(),
        "loaded ledger"
    );
    Ok(accounts)
}

/// In-memory ledger backed by an append-only record log
pub struct AccountStore<L: RecordLog = LedgerFile> {
    accounts: HashMap<AccountId, Account>,
    log: L,
    hasher: Box<dyn CredentialHasher>,
    id_generator: Box<dyn IdGenerator>,
    max_id_attempts: usize,
}

impl AccountStore<LedgerFile> {
    /// Open the ledger file named by the config and load it
    ///
    /// A missing file gives an empty store.
    pub fn open(config: &StoreConfig) -> Result<Self, BankError> {
        let store = AccountStore::load(LedgerFile::new(&config.accounts_file))?
            .with_id_generator(Box::new(RandomIdGenerator::new(config.id_range.clone())))
            .with_max_id_attempts(config.max_id_attempts);

        info!(
            path = %config.accounts_file.display(),
            accounts = store.len(),
            "account store opened"
        );
        Ok(store)
    }
}

impl<L: RecordLog> AccountStore<L> {
    /// Build a store from an existing log
    ///
    /// Uses SHA-256 credentials and five-digit random ids; both can be
    /// replaced with the `with_*` methods.
    pub fn load(log: L) -> Result<Self, BankError> {
        let accounts = load_accounts(&log)?;

        Ok(AccountStore {
            accounts,
            log,
            hasher: Box::new(Sha256Hasher),
            id_generator: Box::new(RandomIdGenerator::default()),
            max_id_attempts: StoreConfig::default().max_id_attempts,
        })
    }

    pub fn with_hasher(mut self, hasher: Box<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_id_generator(mut self, id_generator: Box<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn with_max_id_attempts(mut self, max_id_attempts: usize) -> Self {
        self.max_id_attempts = max_id_attempts.max(1);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts sorted by id
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    /// Open a new account with a zero balance
    ///
    /// Draws ids until one is free, appends the new record, then inserts the
    /// account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No free id was drawn within the configured number of attempts
    /// - The record could not be appended
    pub fn create_account(&mut self, kind: AccountKind, secret: &str) -> Result<&Account, BankError> {
        let id = self.allocate_id()?;
        let account = Account::create(id.clone(), secret, kind, self.hasher.as_ref());

        self.log.append(&[&account])?;
        info!(account = %id, kind = %kind, "account created");

        let account: &Account = self.accounts.entry(id).or_insert(account);
        Ok(account)
    }

    fn allocate_id(&mut self) -> Result<AccountId, BankError> {
        for attempt in 1..=self.max_id_attempts {
            let candidate = self.id_generator.next_id();
            if !self.accounts.contains_key(&candidate) {
                return Ok(candidate);
            }
            warn!(attempt, "account number already taken, drawing again");
        }

        Err(BankError::IdSpaceExhausted {
            attempts: self.max_id_attempts,
        })
    }

    /// Check an id and secret pair
    ///
    /// An unknown id and a wrong secret fail identically.
    pub fn authenticate(&self, id: &str, secret: &str) -> Result<&Account, BankError> {
        match self.accounts.get(id) {
            Some(account) if account.verify(secret, self.hasher.as_ref()) => {
                debug!(account = %id, "authenticated");
                Ok(account)
            }
            _ => {
                warn!(account = %id, "authentication failed");
                Err(BankError::Authentication)
            }
        }
    }

    /// Append the current state of an account to the log
    pub fn persist(&mut self, id: &str) -> Result<(), BankError> {
        let account = self
            .accounts
            .get(id)
            .ok_or_else(|| BankError::account_not_found(id))?;
        self.log.append(&[account])
    }

    /// Deposit into an account and persist the result
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The account's new balance
    /// * `Err(BankError)` - If the account is unknown, the amount is invalid,
    ///   or the record could not be written
    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, BankError> {
        let mut account = self.existing(id)?.clone();
        let balance = account.deposit(amount)?;

        self.commit(vec![account])?;
        Ok(balance)
    }

    /// Withdraw from an account and persist the result
    ///
    /// Fails with `InsufficientFunds` when the amount exceeds the balance;
    /// nothing is written in that case.
    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, BankError> {
        let mut account = self.existing(id)?.clone();
        let balance = account.withdraw(amount)?;

        self.commit(vec![account])?;
        Ok(balance)
    }

    /// Move funds between two accounts
    ///
    /// The recipient is checked first, then the sender is debited, then the
    /// recipient credited. Both resulting records are appended in one write.
    /// Any failure leaves both accounts and the log untouched.
    ///
    /// A transfer to oneself is allowed and leaves the balance unchanged,
    /// still writing two records.
    ///
    /// # Arguments
    ///
    /// * `from` - Sender account id
    /// * `to` - Recipient account id
    /// * `amount` - Amount to move
    ///
    /// # Returns
    ///
    /// The sender's balance after the transfer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The recipient does not exist (`UnknownRecipient`)
    /// - The sender does not exist (`AccountNotFound`)
    /// - The amount is negative or exceeds the sender's balance
    /// - Crediting the recipient would overflow
    /// - The records could not be written
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<Decimal, BankError> {
        if !self.accounts.contains_key(to) {
            return Err(BankError::unknown_recipient(to));
        }

        let mut sender = self.existing(from)?.clone();
        sender.withdraw(amount)?;

        let updated = if from == to {
            sender.deposit(amount)?;
            vec![sender.clone(), sender]
        } else {
            let mut recipient = self.existing(to)?.clone();
            recipient.deposit(amount)?;
            vec![sender, recipient]
        };

        let sender_balance = updated[0].balance();
        self.commit(updated)?;

        info!(from = %from, to = %to, amount = %amount, "transfer committed");
        Ok(sender_balance)
    }

    /// Rewrite the log with exactly one record per account
    ///
    /// # Returns
    ///
    /// The number of records in the compacted log
    pub fn compact(&mut self) -> Result<usize, BankError> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        let count = accounts.len();

        self.log.replace(&accounts)?;

        info!(records = count, "ledger compacted");
        Ok(count)
    }

    fn existing(&self, id: &str) -> Result<&Account, BankError> {
        self.accounts
            .get(id)
            .ok_or_else(|| BankError::account_not_found(id))
    }

    fn commit(&mut self, updated: Vec<Account>) -> Result<(), BankError> {
        let records: Vec<&Account> = updated.iter().collect();
        self.log.append(&records)?;

        for account in updated {
            self.accounts.insert(account.id().to_string(), account);
        }
        Ok(())
    }
}

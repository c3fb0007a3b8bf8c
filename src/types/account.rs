//! Account-related types for the terminal bank
//!
//! This module defines the Account entity and its kind tag. An account owns
//! its balance rules (non-negative balance, checked arithmetic); persistence is
//! the store's responsibility, not the entity's.

use super::error::BankError;
use crate::core::traits::CredentialHasher;
use rust_decimal::Decimal;
use std::fmt;

/// Account identifier
///
/// Opaque string, generated by the store at creation time. In practice a
/// five-digit number rendered as text.
pub type AccountId = String;

/// Kind of account
///
/// Personal and Business accounts behave identically; the kind is a label
/// carried through persistence and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Personal,
    Business,
}

impl AccountKind {
    /// Parse a persisted or user-entered kind label
    ///
    /// Only the exact literal `"Personal"` maps to [`AccountKind::Personal`];
    /// every other value maps to [`AccountKind::Business`].
    pub fn from_label(label: &str) -> Self {
        if label == "Personal" {
            AccountKind::Personal
        } else {
            AccountKind::Business
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Personal => "Personal",
            AccountKind::Business => "Business",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank account state
///
/// Identity, credential digest and kind are fixed once the account exists.
/// The balance only changes through [`Account::deposit`] and
/// [`Account::withdraw`], and never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    credential_digest: String,
    kind: AccountKind,
    balance: Decimal,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier assigned by the store
    /// * `secret` - Plaintext secret; only its digest is kept
    /// * `kind` - Personal or Business
    /// * `hasher` - Credential hasher used to derive the digest
    pub fn create<H>(id: AccountId, secret: &str, kind: AccountKind, hasher: &H) -> Self
    where
        H: CredentialHasher + ?Sized,
    {
        Account {
            id,
            credential_digest: hasher.hash(secret),
            kind,
            balance: Decimal::ZERO,
        }
    }

    /// Rebuild an account from persisted fields, taken verbatim
    pub fn from_parts(
        id: AccountId,
        credential_digest: String,
        kind: AccountKind,
        balance: Decimal,
    ) -> Self {
        Account {
            id,
            credential_digest,
            kind,
            balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn credential_digest(&self) -> &str {
        &self.credential_digest
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Check a candidate secret against the stored digest
    pub fn verify<H>(&self, candidate: &str, hasher: &H) -> bool
    where
        H: CredentialHasher + ?Sized,
    {
        hasher.matches(candidate, &self.credential_digest)
    }

    /// Deposit funds into the account
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The balance after the deposit
    /// * `Err(BankError)` - If the amount is negative or the balance would overflow
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(BankError::invalid_amount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", &self.id))?;

        Ok(self.balance)
    }

    /// Withdraw funds from the account
    ///
    /// Fails without touching the balance when the amount exceeds the current
    /// balance; a withdrawal is never clamped.
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The balance after the withdrawal
    /// * `Err(BankError)` - If the amount is negative or exceeds the balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(BankError::invalid_amount(amount));
        }

        if amount > self.balance {
            return Err(BankError::insufficient_funds(&self.id, self.balance, amount));
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", &self.id))?;

        Ok(self.balance)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account Number: {}, Type: {}, Balance: {:.2}",
            self.id, self.kind, self.balance
        )
    }
}

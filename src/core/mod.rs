//! Core ledger module
//!
//! This module contains the ledger core and its collaborators:
//! - `traits` - Seams for hashing, id generation and persistence
//! - `credential` - SHA-256 credential hasher
//! - `id_generator` - Random account id generation
//! - `account_store` - Account ownership, authentication and transfers

pub mod account_store;
pub mod credential;
pub mod id_generator;
pub mod traits;

pub use account_store::{load_accounts, AccountStore};
pub use credential::Sha256Hasher;
pub use id_generator::RandomIdGenerator;
pub use traits::{CredentialHasher, IdGenerator, RecordLog};

use std::collections::HashMap;

use anyhow::anyhow;
use log::debug;
use thiserror::Error;

use crate::model::Account;
use crate::Result;

/// Errors raised by the account storages.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The account number is already in use.
    #[error("An account with number '{0}' already exists.")]
    DuplicateAccount(String),

    /// There is no account with this number.
    #[error("Account '{0}' not found.")]
    NotFound(String),

    /// The stored balance cannot be read back as a decimal.
    #[error("Account '{account_number}' has an unreadable balance '{value}'.")]
    CorruptBalance {
        /// The account holding the balance.
        account_number: String,

        /// The raw stored value.
        value: String,
    },
}

/// Account storage trait.
///
/// This trait defines the operations the account service needs from a
/// storage. Accounts are keyed by their account number. It must raise an
/// error only if the operation leads to a non consistent state or if there
/// are IO errors, a lookup that finds nothing is not an error.
pub trait AccountStorage {
    /// Get the account matching both the account number and the PIN code.
    fn lookup(&self, account_number: &str, pin_code: &str) -> Result<Option<Account>>;

    /// Store a new account.
    /// Fails with [StorageError::DuplicateAccount] if the number is taken.
    fn insert(&mut self, account: Account) -> Result<()>;

    /// Replace the stored account having the same account number.
    /// Fails with [StorageError::NotFound] if there is no such account.
    fn update(&mut self, account: Account) -> Result<()>;
}

/// A simple in-memory account storage.
#[derive(Debug, Default)]
pub struct InMemoryAccountStorage {
    accounts: HashMap<String, Account>,
}

impl AccountStorage for InMemoryAccountStorage {
    fn lookup(&self, account_number: &str, pin_code: &str) -> Result<Option<Account>> {
        let account = self
            .accounts
            .get(account_number)
            .filter(|account| account.matches(account_number, pin_code))
            .cloned();

        Ok(account)
    }

    fn insert(&mut self, account: Account) -> Result<()> {
        if self.accounts.contains_key(&account.account_number) {
            return Err(anyhow!(StorageError::DuplicateAccount(
                account.account_number
            )));
        }
        debug!("Storing new account '{}'.", account.account_number);
        self.accounts.insert(account.account_number.clone(), account);

        Ok(())
    }

    fn update(&mut self, account: Account) -> Result<()> {
        let stored = self
            .accounts
            .get_mut(&account.account_number)
            .ok_or_else(|| anyhow!(StorageError::NotFound(account.account_number.clone())))?;
        *stored = account;

        Ok(())
    }
}

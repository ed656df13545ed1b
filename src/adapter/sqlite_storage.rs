//! SQLite account storage.
//!
//! Balances are stored as their exact decimal text so no precision is lost
//! going through SQLite's floating point types.

use std::{path::Path, str::FromStr};

use anyhow::{anyhow, Context};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use super::{AccountStorage, StorageError};
use crate::model::Account;
use crate::Result;

/// Account storage backed by a SQLite database.
pub struct SqliteAccountStorage {
    conn: Connection,
}

impl SqliteAccountStorage {
    /// Open (or create) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Cannot open database '{}'.", path.as_ref().display()))?;

        Self::with_connection(conn)
    }

    /// Create a storage living in memory only.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let storage = Self { conn };
        storage.init_schema()?;

        Ok(storage)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS accounts (
                    account_number TEXT PRIMARY KEY,
                    pin_code TEXT NOT NULL,
                    balance TEXT NOT NULL
                )",
                [],
            )
            .context("Cannot create the accounts table.")?;

        Ok(())
    }
}

fn parse_balance(account_number: &str, value: String) -> Result<Decimal> {
    Decimal::from_str(&value).map_err(|_| {
        anyhow!(StorageError::CorruptBalance {
            account_number: account_number.to_string(),
            value,
        })
    })
}

impl AccountStorage for SqliteAccountStorage {
    fn lookup(&self, account_number: &str, pin_code: &str) -> Result<Option<Account>> {
        let row = self
            .conn
            .query_row(
                "SELECT account_number, pin_code, balance FROM accounts
                 WHERE account_number = ?1 AND pin_code = ?2",
                params![account_number, pin_code],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(account_number, pin_code, balance)| -> Result<Account> {
            let balance = parse_balance(&account_number, balance)?;

            Ok(Account {
                account_number,
                pin_code,
                balance,
            })
        })
        .transpose()
    }

    fn insert(&mut self, account: Account) -> Result<()> {
        let rows = self.conn.execute(
            "INSERT OR IGNORE INTO accounts (account_number, pin_code, balance)
             VALUES (?1, ?2, ?3)",
            params![
                account.account_number,
                account.pin_code,
                account.balance.to_string()
            ],
        )?;

        if rows == 0 {
            return Err(anyhow!(StorageError::DuplicateAccount(
                account.account_number
            )));
        }
        debug!("Stored new account '{}'.", account.account_number);

        Ok(())
    }

    fn update(&mut self, account: Account) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE accounts SET pin_code = ?2, balance = ?3 WHERE account_number = ?1",
            params![
                account.account_number,
                account.pin_code,
                account.balance.to_string()
            ],
        )?;

        if rows == 0 {
            return Err(anyhow!(StorageError::NotFound(account.account_number)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_storage_tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn stored_balance(storage: &SqliteAccountStorage, account_number: &str) -> String {
        storage
            .conn
            .query_row(
                "SELECT balance FROM accounts WHERE account_number = ?1",
                params![account_number],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut storage = SqliteAccountStorage::in_memory().unwrap();
        let account = Account::new("12345678", "1234", dec!(1234.5678));
        storage.insert(account.clone()).unwrap();

        assert_eq!(storage.lookup("12345678", "1234").unwrap(), Some(account));
        assert_eq!(stored_balance(&storage, "12345678"), "1234.5678");
    }

    #[test]
    fn test_lookup_wrong_credentials() {
        let mut storage = SqliteAccountStorage::in_memory().unwrap();
        storage
            .insert(Account::new("ACC-1", "1234", dec!(10)))
            .unwrap();

        assert_eq!(storage.lookup("ACC-1", "4321").unwrap(), None);
        assert_eq!(storage.lookup("acc-1", "1234").unwrap(), None);
    }

    #[test]
    fn test_insert_already_exists() {
        let mut storage = SqliteAccountStorage::in_memory().unwrap();
        storage
            .insert(Account::new("12345678", "1234", dec!(100)))
            .unwrap();
        let error = storage
            .insert(Account::new("12345678", "4321", dec!(5)))
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<StorageError>(),
            Some(StorageError::DuplicateAccount(number)) if number == "12345678"
        ));
        assert_eq!(stored_balance(&storage, "12345678"), "100");
    }

    #[test]
    fn test_update() {
        let mut storage = SqliteAccountStorage::in_memory().unwrap();
        storage
            .insert(Account::new("12345678", "1234", dec!(100)))
            .unwrap();
        storage
            .update(Account::new("12345678", "1234", dec!(60.25)))
            .unwrap();

        let account = storage.lookup("12345678", "1234").unwrap().unwrap();
        assert_eq!(account.balance, dec!(60.25));
    }

    #[test]
    fn test_update_non_existing_account() {
        let mut storage = SqliteAccountStorage::in_memory().unwrap();
        let error = storage
            .update(Account::new("12345678", "1234", dec!(40)))
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<StorageError>(),
            Some(StorageError::NotFound(number)) if number == "12345678"
        ));
    }

    #[test]
    fn test_corrupt_balance() {
        let storage = SqliteAccountStorage::in_memory().unwrap();
        storage
            .conn
            .execute(
                "INSERT INTO accounts VALUES ('12345678', '1234', 'lots')",
                [],
            )
            .unwrap();
        let error = storage.lookup("12345678", "1234").unwrap_err();

        assert!(matches!(
            error.downcast_ref::<StorageError>(),
            Some(StorageError::CorruptBalance { value, .. }) if value == "lots"
        ));
    }

    #[test]
    fn test_reopen_database_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("accounts.db");
        {
            let mut storage = SqliteAccountStorage::open(&path).unwrap();
            storage
                .insert(Account::new("12345678", "1234", dec!(500)))
                .unwrap();
        }
        let storage = SqliteAccountStorage::open(&path).unwrap();
        let account = storage.lookup("12345678", "1234").unwrap().unwrap();

        assert_eq!(account.balance, dec!(500));
    }
}

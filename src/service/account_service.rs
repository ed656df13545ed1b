use std::sync::Mutex;

use anyhow::anyhow;
use log::debug;
use rust_decimal::Decimal;

use crate::adapter::AccountStorage;
use crate::model::{is_valid_pin, Account};
use crate::Result;

/// Business rule violations raised by the [AccountService].
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    /// The given arguments are malformed.
    #[error("{0}")]
    InvalidInput(String),

    /// The account number and PIN code do not designate any account. It does
    /// not tell which one of the two is wrong.
    #[error("invalid account number or PIN")]
    AuthenticationFailed,

    /// The balance does not cover the requested amount.
    #[error("insufficient funds")]
    InsufficientFunds {
        /// The balance of the account.
        balance: Decimal,

        /// The withdraw amount requested.
        requested: Decimal,
    },
}

fn invalid_input(message: &str) -> anyhow::Error {
    anyhow!(AccountServiceError::InvalidInput(message.to_string()))
}

/// The [AccountService] enforces the business rules on account creation and
/// withdrawal before reading or writing anything through its storage.
///
/// The service can be shared amongst threads in an `Arc`. The storage sits
/// behind a mutex held for the whole duration of an operation, so two
/// withdrawals on the same account cannot both pass the balance check.
pub struct AccountService {
    store: Mutex<Box<dyn AccountStorage + Send>>,
}

impl AccountService {
    /// Create a new account service on top of the given storage.
    pub fn new(storage: impl AccountStorage + Send + 'static) -> Self {
        Self {
            store: Mutex::new(Box::new(storage)),
        }
    }

    /// Create and store a new account. The returned account is the one that
    /// was handed to the storage.
    ///
    /// The arguments are checked in this order: the account number and the
    /// PIN code must not be blank, the PIN code must be made of exactly 4
    /// digits and the initial balance cannot be negative.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    ///
    /// use bank_account::adapter::{InMemoryAccountStorage, StorageError};
    /// use bank_account::service::{AccountService, AccountServiceError};
    ///
    /// let service = AccountService::new(InMemoryAccountStorage::default());
    /// let account = service.create_account("12345678", "1234", dec!(100)).unwrap();
    ///
    /// assert_eq!(account.account_number, "12345678");
    /// assert_eq!(account.balance, dec!(100));
    ///
    /// // malformed PIN code
    /// let error = service.create_account("87654321", "12a4", dec!(100)).unwrap_err();
    /// assert!(matches!(
    ///     error.downcast_ref::<AccountServiceError>(),
    ///     Some(AccountServiceError::InvalidInput(_))
    /// ));
    ///
    /// // account numbers are unique
    /// let error = service.create_account("12345678", "4321", dec!(5)).unwrap_err();
    /// assert!(matches!(
    ///     error.downcast_ref::<StorageError>(),
    ///     Some(StorageError::DuplicateAccount(_))
    /// ));
    /// ```
    pub fn create_account(
        &self,
        account_number: &str,
        pin_code: &str,
        initial_balance: Decimal,
    ) -> Result<Account> {
        if account_number.trim().is_empty() {
            return Err(invalid_input("account number cannot be empty"));
        }
        if pin_code.trim().is_empty() {
            return Err(invalid_input("PIN code cannot be empty"));
        }
        if !is_valid_pin(pin_code) {
            return Err(invalid_input(
                "PIN code must be exactly 4 digits long and contain only numbers.",
            ));
        }
        if initial_balance < Decimal::ZERO {
            return Err(invalid_input("initial balance cannot be negative"));
        }

        let account = Account::new(account_number, pin_code, initial_balance);
        // A poisoned lock means another operation panicked halfway, panic as well.
        self.store.lock().unwrap().insert(account.clone())?;
        debug!(
            "Account '{}' created with balance {}.",
            account.account_number, account.balance
        );

        Ok(account)
    }

    /// Withdraw the given amount from the account designated by the account
    /// number and PIN code and return the new balance. Nothing is stored if
    /// the withdrawal is refused.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    ///
    /// use bank_account::adapter::InMemoryAccountStorage;
    /// use bank_account::service::{AccountService, AccountServiceError};
    ///
    /// let service = AccountService::new(InMemoryAccountStorage::default());
    /// service.create_account("12345678", "1234", dec!(500)).unwrap();
    ///
    /// assert_eq!(service.withdraw("12345678", "1234", dec!(200)).unwrap(), dec!(300));
    ///
    /// let error = service.withdraw("12345678", "9999", dec!(10)).unwrap_err();
    /// assert!(matches!(
    ///     error.downcast_ref::<AccountServiceError>(),
    ///     Some(AccountServiceError::AuthenticationFailed)
    /// ));
    ///
    /// let error = service.withdraw("12345678", "1234", dec!(301)).unwrap_err();
    /// assert!(matches!(
    ///     error.downcast_ref::<AccountServiceError>(),
    ///     Some(AccountServiceError::InsufficientFunds { balance, requested })
    ///         if *balance == dec!(300) && *requested == dec!(301)
    /// ));
    /// ```
    pub fn withdraw(&self, account_number: &str, pin_code: &str, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(invalid_input("withdrawal amount must be strictly positive"));
        }

        let mut guard = self.store.lock().unwrap();
        let mut account = guard
            .lookup(account_number, pin_code)?
            .ok_or_else(|| anyhow!(AccountServiceError::AuthenticationFailed))?;

        if !self.has_sufficient_balance(&account, amount) {
            return Err(anyhow!(AccountServiceError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            }));
        }
        let balance = account.debit(amount);
        guard.update(account)?;
        debug!("Withdrew {amount} from account '{account_number}', balance is now {balance}.");

        Ok(balance)
    }

    /// Tells if the balance of the account covers the given amount.
    pub fn has_sufficient_balance(&self, account: &Account, amount: Decimal) -> bool {
        account.balance >= amount
    }

    /// Get the account matching the given credentials if any.
    pub fn lookup(&self, account_number: &str, pin_code: &str) -> Result<Option<Account>> {
        self.store.lock().unwrap().lookup(account_number, pin_code)
    }
}

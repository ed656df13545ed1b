use rust_decimal::Decimal;

/// Number of digits a PIN code is made of.
pub const PIN_LENGTH: usize = 4;

/// A bank account. The account number identifies the account and never
/// changes once the account is stored, only the balance moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The unique account number.
    pub account_number: String,

    /// The PIN code required to withdraw from the account.
    pub pin_code: String,

    /// The funds in the account.
    pub balance: Decimal,
}

impl Account {
    /// Creates a new account with the given credentials and balance. No
    /// validation happens here, see the account service for that.
    pub fn new(account_number: &str, pin_code: &str, balance: Decimal) -> Self {
        Self {
            account_number: account_number.to_string(),
            pin_code: pin_code.to_string(),
            balance,
        }
    }

    /// Tells if both the account number and the PIN code match exactly.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use bank_account::model::Account;
    ///
    /// let account = Account::new("12345678", "1234", Decimal::ONE_HUNDRED);
    ///
    /// assert!(account.matches("12345678", "1234"));
    /// assert!(!account.matches("12345678", "4321"));
    /// assert!(!account.matches("87654321", "1234"));
    /// ```
    pub fn matches(&self, account_number: &str, pin_code: &str) -> bool {
        self.account_number == account_number && self.pin_code == pin_code
    }

    /// Subtracts the given amount from the balance. The caller is responsible
    /// for checking the balance covers the amount.
    pub fn debit(&mut self, amount: Decimal) -> Decimal {
        self.balance -= amount;

        self.balance
    }
}

/// Checks a PIN code is made of exactly [PIN_LENGTH] decimal digits.
///
/// ```
/// use bank_account::model::is_valid_pin;
///
/// assert!(is_valid_pin("0042"));
/// assert!(!is_valid_pin("12a4"));
/// assert!(!is_valid_pin("12345"));
/// assert!(!is_valid_pin(" 123"));
/// ```
pub fn is_valid_pin(pin_code: &str) -> bool {
    pin_code.chars().count() == PIN_LENGTH && pin_code.chars().all(|c| c.is_ascii_digit())
}

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// An operation requested on the accounts, as read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOrder {
    /// Open a new account.
    Open {
        account_number: String,
        pin_code: String,
        initial_balance: Decimal,
    },

    /// Withdraw funds from an existing account.
    Withdraw {
        account_number: String,
        pin_code: String,
        amount: Decimal,
    },
}

/// Error type for order creation.
#[derive(Debug, Clone, Error)]
pub enum AccountOrderError {
    /// The order type is not known.
    #[error("Unknown order type '{0}'.")]
    UnknownOrderType(String),

    /// Every order carries an amount.
    #[error("Order type '{0}' requires an amount.")]
    MissingAmount(String),
}

/// A raw record of a batch CSV file.
#[derive(Debug, Deserialize)]
pub struct CSVOrderEntity {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "account")]
    pub account_number: String,

    #[serde(rename = "pin")]
    pub pin_code: String,

    pub amount: Option<Decimal>,
}

impl TryFrom<CSVOrderEntity> for AccountOrder {
    type Error = AccountOrderError;

    /// ```
    /// use rust_decimal_macros::dec;
    /// use bank_account::model::{AccountOrder, AccountOrderError, CSVOrderEntity};
    ///
    /// let entity = CSVOrderEntity {
    ///     kind: "Withdraw".to_string(),
    ///     account_number: "12345678".to_string(),
    ///     pin_code: "1234".to_string(),
    ///     amount: Some(dec!(20)),
    /// };
    /// let order = AccountOrder::try_from(entity).unwrap();
    ///
    /// assert!(matches!(order, AccountOrder::Withdraw { amount, .. } if amount == dec!(20)));
    ///
    /// let entity = CSVOrderEntity {
    ///     kind: "deposit".to_string(),
    ///     account_number: "12345678".to_string(),
    ///     pin_code: "1234".to_string(),
    ///     amount: Some(dec!(20)),
    /// };
    /// let error = AccountOrder::try_from(entity).unwrap_err();
    ///
    /// assert!(matches!(error, AccountOrderError::UnknownOrderType(kind) if kind == "deposit"));
    /// ```
    fn try_from(entity: CSVOrderEntity) -> Result<Self, Self::Error> {
        let kind = entity.kind.to_lowercase();
        if kind != "open" && kind != "withdraw" {
            return Err(AccountOrderError::UnknownOrderType(entity.kind));
        }
        let amount = entity
            .amount
            .ok_or_else(|| AccountOrderError::MissingAmount(kind.clone()))?;

        let order = if kind == "open" {
            Self::Open {
                account_number: entity.account_number,
                pin_code: entity.pin_code,
                initial_balance: amount,
            }
        } else {
            Self::Withdraw {
                account_number: entity.account_number,
                pin_code: entity.pin_code,
                amount,
            }
        };

        Ok(order)
    }
}

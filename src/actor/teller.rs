//! The teller actor applies account orders through the [AccountService].

use std::sync::{mpsc::Receiver, Arc};

use log::{debug, info};

use crate::{model::AccountOrder, service::AccountService};

/// The teller actor opens accounts and performs withdrawals.
pub struct Teller {
    /// The account service.
    account_service: Arc<AccountService>,

    /// The order channel receiver to read account orders.
    order_receiver: Receiver<AccountOrder>,
}

impl Teller {
    /// Create a new teller actor.
    pub fn new(account_service: Arc<AccountService>, order_receiver: Receiver<AccountOrder>) -> Self {
        Self {
            account_service,
            order_receiver,
        }
    }

    /// Run the teller actor.
    /// It will NOT stop when an order is refused but only log the error. The
    /// actor stops when the order channel is closed. Returns the number of
    /// orders that succeeded.
    pub fn run(&self) -> usize {
        let mut processed = 0;

        for order in self.order_receiver.iter() {
            match self.process(&order) {
                Ok(()) => processed += 1,
                Err(error) => info!("Error processing order {:?}: {}", order, error),
            }
        }

        processed
    }

    fn process(&self, order: &AccountOrder) -> crate::Result<()> {
        match order {
            AccountOrder::Open {
                account_number,
                pin_code,
                initial_balance,
            } => {
                self.account_service
                    .create_account(account_number, pin_code, *initial_balance)?;
            }
            AccountOrder::Withdraw {
                account_number,
                pin_code,
                amount,
            } => {
                let balance = self
                    .account_service
                    .withdraw(account_number, pin_code, *amount)?;
                debug!("Account '{account_number}' balance: {balance}");
            }
        }

        Ok(())
    }
}

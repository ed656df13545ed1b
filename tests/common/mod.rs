use rand::Rng;
use rust_decimal::Decimal;

use bank_account::model::Account;

/// Builds accounts with random credentials and a balance between 100 and
/// 5000, any field can be overridden.
#[derive(Debug, Default)]
pub struct FakeAccount {
    pub account_number: Option<String>,
    pub pin_code: Option<String>,
    pub balance: Option<Decimal>,
}

impl FakeAccount {
    pub fn with_balance(balance: Decimal) -> Self {
        Self {
            balance: Some(balance),
            ..Default::default()
        }
    }

    pub fn build(self) -> Account {
        let mut rng = rand::thread_rng();
        let account_number = self
            .account_number
            .unwrap_or_else(|| digits(&mut rng, 8));
        let pin_code = self.pin_code.unwrap_or_else(|| digits(&mut rng, 4));
        let balance = self
            .balance
            .unwrap_or_else(|| Decimal::new(rng.gen_range(10_000..=500_000), 2));

        Account::new(&account_number, &pin_code, balance)
    }
}

fn digits(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

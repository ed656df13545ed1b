use std::{io::BufReader, path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use rust_decimal::Decimal;

use bank_account::{
    actor::{Reader, Teller},
    adapter::{InMemoryAccountStorage, SqliteAccountStorage},
    model::AccountOrder,
    service::AccountService,
    Result,
};

/// Command line arguments
#[derive(Debug, Parser)]
struct CLIArguments {
    /// SQLite database holding the accounts. Accounts are kept in memory
    /// when not given.
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a new account.
    Create {
        account_number: String,
        pin_code: String,
        #[arg(allow_hyphen_values = true)]
        initial_balance: Decimal,
    },

    /// Withdraw funds from an account.
    Withdraw {
        account_number: String,
        pin_code: String,
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },

    /// Apply the orders of a CSV file (type, account, pin, amount).
    Batch { csv_file: PathBuf },
}

struct Application {
    service: Arc<AccountService>,
}

impl Application {
    fn new(database: Option<PathBuf>) -> Result<Self> {
        let service = match database {
            Some(path) => {
                debug!("Using database '{}'.", path.display());
                AccountService::new(SqliteAccountStorage::open(path)?)
            }
            None => AccountService::new(InMemoryAccountStorage::default()),
        };

        Ok(Self {
            service: Arc::new(service),
        })
    }

    fn run(&self, command: Command) -> Result<()> {
        info!("Starting BANK_ACCOUNT version {}", env!("CARGO_PKG_VERSION"));

        match command {
            Command::Create {
                account_number,
                pin_code,
                initial_balance,
            } => {
                let account =
                    self.service
                        .create_account(&account_number, &pin_code, initial_balance)?;
                println!("{},{}", account.account_number, account.balance);
            }
            Command::Withdraw {
                account_number,
                pin_code,
                amount,
            } => {
                let balance = self.service.withdraw(&account_number, &pin_code, amount)?;
                println!("{},{}", account_number, balance);
            }
            Command::Batch { csv_file } => self.run_batch(csv_file)?,
        }

        Ok(())
    }

    fn run_batch(&self, csv_file: PathBuf) -> Result<()> {
        if !csv_file.exists() {
            bail!("CSV file does not exist: '{:?}'.", csv_file.display());
        }
        if !csv_file.is_file() {
            bail!("CSV file is not a file: '{:?}'.", csv_file.display());
        }
        debug!("Reading CSV file: '{:?}'.", csv_file.canonicalize());

        let (order_sender, order_receiver) = std::sync::mpsc::channel::<AccountOrder>();
        let buffer = BufReader::new(std::fs::File::open(&csv_file)?);

        let teller = Teller::new(self.service.clone(), order_receiver);
        let teller_handler = std::thread::spawn(move || teller.run());

        let reader = Reader::new(order_sender, Box::new(buffer));
        let reader_handler = std::thread::spawn(move || reader.run());

        reader_handler
            .join()
            .map_err(|_| anyhow!("Reader thread panicked"))??;
        let processed = teller_handler
            .join()
            .map_err(|_| anyhow!("Teller thread panicked"))?;
        info!("{processed} orders applied.");

        Ok(())
    }
}

fn main() -> Result<()> {
    let arguments = CLIArguments::parse();
    env_logger::init();
    let application = Application::new(arguments.database)?;

    let result = application.run(arguments.command);

    match &result {
        Ok(_) => {
            info!("BANK_ACCOUNT completed successfully");
        }
        Err(error) => {
            error!("BANK_ACCOUNT failed with error: {}", error);
        }
    };

    result
}

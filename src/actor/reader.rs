//! Reader actor
//!
//! The reader actor is responsible for reading account orders from a CSV
//! file. The actor reads the file line by line and sends the orders to the
//! teller actor through a channel.

use std::{io::Read, sync::mpsc::Sender};

use csv::ReaderBuilder;
use log::{debug, info};

use crate::model::{AccountOrder, CSVOrderEntity};

/// Reader actor.
pub struct Reader {
    /// The order channel sender to send account orders.
    order_sender: Sender<AccountOrder>,
    reader: Box<dyn Read + Send>,
}

impl Reader {
    /// Create a new reader actor.
    pub fn new(order_sender: Sender<AccountOrder>, reader: Box<dyn Read + Send>) -> Self {
        Self {
            order_sender,
            reader,
        }
    }

    /// Run the reader actor.
    /// Records that cannot be read or turned into orders are logged and
    /// skipped. The channel is closed when the actor returns.
    pub fn run(self) -> crate::Result<()> {
        debug!("Reader Actor started");
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(self.reader);

        for result in csv_reader.deserialize() {
            let record: CSVOrderEntity = match result {
                Err(error) => {
                    info!("Error reading CSV record: {}", error);
                    continue;
                }
                Ok(record) => record,
            };
            let order = match AccountOrder::try_from(record) {
                Err(error) => {
                    info!("Error parsing CSV record: {}", error);
                    continue;
                }
                Ok(order) => order,
            };

            self.order_sender.send(order)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::mpsc::channel;

    fn run_reader(data: &'static str) -> Vec<AccountOrder> {
        let (tx, rx) = channel();
        let actor = Reader::new(tx, Box::new(data.as_bytes()));
        let handler = std::thread::spawn(move || actor.run());

        assert!(handler.join().unwrap().is_ok());
        rx.iter().collect()
    }

    #[test]
    fn simple_ok_sample() {
        let data = r#"type, account, pin, amount
open, 12345678, 1234, 500
open, 87654321, 0000, 10.5
withdraw, 12345678, 1234, 200"#;

        assert_eq!(run_reader(data).len(), 3);
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let data = r#"type, account, pin, amount
open, 00012345, 0042, 1"#;
        let orders = run_reader(data);

        assert!(matches!(
            &orders[0],
            AccountOrder::Open { account_number, pin_code, .. }
                if account_number == "00012345" && pin_code == "0042"
        ));
    }

    #[test]
    fn test_mixed_case_and_spaces() {
        let data = r#"type, account, pin, amount
Open,12345678,1234,500
   WITHDRAW   , 12345678 , 1234 , 20  "#;

        assert_eq!(run_reader(data).len(), 2);
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let data = r#"type, account, pin, amount
open, 12345678, 1234, 500
deposit, 12345678, 1234, 20
withdraw, 12345678, 1234, lots
withdraw, 12345678, 1234,
withdraw, 12345678, 1234, 20"#;

        assert_eq!(run_reader(data).len(), 2);
    }
}

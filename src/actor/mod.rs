//! # Actor module
//!
//! The actors are controllers. They use services to perform their tasks and
//! communicate with other actors through messages.

mod reader;
mod teller;

pub use reader::*;
pub use teller::*;

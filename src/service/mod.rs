//! Service module
//!
//! Services hold the business logic of the application. They are used by the
//! actors and the command line to perform operations on the accounts and they
//! must ensure the stored data stays consistent.

mod account_service;

pub use account_service::*;

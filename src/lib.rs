//! BANK ACCOUNT LIBRARY
//!
//! This library provides an account service to open bank accounts and
//! withdraw funds from them, on top of interchangeable account storages.

pub mod actor;
pub mod adapter;
pub mod model;
pub mod service;

pub type Result<T> = anyhow::Result<T>;

mod account;
mod order;

pub use account::*;
pub use order::*;

//! Decoding of simulator results.

mod balance;
mod logs;

pub use balance::*;
pub use logs::*;

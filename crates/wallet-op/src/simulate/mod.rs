//! Remote execution of compiled fragments.

mod client;
mod encode;
mod types;

pub use client::*;
pub use encode::*;
pub use types::*;

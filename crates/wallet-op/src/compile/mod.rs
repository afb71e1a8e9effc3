//! Standard-JSON compilation of synthesized units.

mod input;
mod output;
mod solc;

pub use input::*;
pub use output::*;
pub use solc::*;

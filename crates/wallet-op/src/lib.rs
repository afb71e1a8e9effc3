//! Compile one-off Solidity fallback fragments and run them in a remote transaction simulator.
//!
//! The pipeline has two stages:
//! 1. [`synthesize`] wraps a fragment into a uniquely named contract, [`CompilerInput`] turns it
//!    into a standard-JSON compile request and [`CompilerOutput::into_result`] extracts the ABI,
//!    runtime code and warnings from the compiler's answer.
//! 2. [`SimulationClient::simulate`] executes the runtime code through a pre-deployed entry point
//!    and decodes the simulator's raw logs and balance diffs against caller-supplied ABIs.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod builtins;
pub mod constants;
pub mod logging;

mod compile;
pub use compile::*;

mod config;
pub use config::*;

mod decode;
pub use decode::*;

mod error;
pub use error::*;

mod simulate;
pub use simulate::*;

mod synth;
pub use synth::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alloy_dyn_abi::DynSolValue;
pub use alloy_json_abi::{AbiItem, Event};
pub use alloy_primitives;

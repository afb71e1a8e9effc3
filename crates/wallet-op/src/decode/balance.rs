//! Balance changes reported by the simulator.

use std::str::FromStr;

use alloy_primitives::{Address, U256};

use crate::{RawBalanceDiff, SimulateError, TransportError};

/// Balance of one account before and after the simulated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceDiff {
    /// The account
    pub address: Address,
    /// Balance before execution
    pub start: U256,
    /// Balance after execution
    pub end: U256,
}

impl BalanceDiff {
    /// Returns `true` if the balance grew.
    pub fn is_increase(&self) -> bool {
        self.end > self.start
    }

    /// Returns `true` if the balance shrank.
    pub fn is_decrease(&self) -> bool {
        self.end < self.start
    }

    /// Magnitude of the change, regardless of direction.
    pub fn change(&self) -> U256 {
        if self.end >= self.start {
            self.end - self.start
        } else {
            self.start - self.end
        }
    }
}

impl TryFrom<&RawBalanceDiff> for BalanceDiff {
    type Error = TransportError;

    fn try_from(raw: &RawBalanceDiff) -> Result<Self, Self::Error> {
        Ok(Self {
            address: raw.address,
            start: parse_balance(&raw.original)?,
            end: parse_balance(&raw.dirty)?,
        })
    }
}

/// Parses a `0x` prefixed hex or a decimal balance. Values without digits are rejected.
fn parse_balance(value: &str) -> Result<U256, TransportError> {
    let invalid = || TransportError::InvalidBalance(value.to_string());
    let trimmed = value.trim();
    if trimmed.strip_prefix("0x").unwrap_or(trimmed).is_empty() {
        return Err(invalid());
    }
    U256::from_str(trimmed).map_err(|_| invalid())
}

/// Converts the simulator's balance diffs, keeping their order and any duplicates.
pub fn extract_balance_diffs(raw: &[RawBalanceDiff]) -> Result<Vec<BalanceDiff>, SimulateError> {
    Ok(raw.iter().map(BalanceDiff::try_from).collect::<Result<Vec<_>, TransportError>>()?)
}

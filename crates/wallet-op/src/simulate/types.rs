//! Simulation parameters and the simulator's wire format.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    constants::simulate::SIMULATION_TYPE, encode_exec_call, BalanceDiff, InterfaceDescriptor,
    LogEntry,
};

/// Everything needed to simulate one execution of a compiled fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Chain to simulate on
    pub network_id: u64,
    /// Address of the pre-deployed entry point
    pub entry_point: Address,
    /// Sender of the transaction, owner of the simulated wallet
    pub owner: Address,
    /// Value sent with the transaction, in wei
    pub value: U256,
    /// Gas limit
    pub gas: u64,
    /// Runtime bytecode of the compiled unit
    pub runtime_code: Bytes,
    /// Salt selecting the simulated wallet
    pub wallet_salt: U256,
    /// Interface descriptors whose events are used to decode the logs
    pub abis: Vec<InterfaceDescriptor>,
}

impl SimulationParams {
    /// Creates parameters with zero value, zero salt and no ABIs.
    pub fn new(
        network_id: u64,
        entry_point: Address,
        owner: Address,
        runtime_code: Bytes,
        gas: u64,
    ) -> Self {
        Self {
            network_id,
            entry_point,
            owner,
            value: U256::ZERO,
            gas,
            runtime_code,
            wallet_salt: U256::ZERO,
            abis: Vec::new(),
        }
    }

    /// Sets the transaction value.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the wallet salt.
    pub fn with_wallet_salt(mut self, wallet_salt: U256) -> Self {
        self.wallet_salt = wallet_salt;
        self
    }

    /// Appends interface descriptors used for decoding.
    pub fn with_abis<I>(mut self, abis: I) -> Self
    where
        I: IntoIterator<Item = InterfaceDescriptor>,
    {
        self.abis.extend(abis);
        self
    }
}

/// The request body sent to the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationRequest {
    /// Whether the simulation is stored, always `false`
    pub save: bool,
    /// Whether a failed simulation is stored, always `false`
    pub save_if_fails: bool,
    /// Simulation mode, always `quick`
    pub simulation_type: String,
    /// Chain id, as a decimal string
    pub network_id: String,
    /// Transaction sender
    pub from: Address,
    /// Transaction target, the entry point
    pub to: Address,
    /// Encoded `exec` call
    pub input: Bytes,
    /// Value in wei, as a decimal string
    pub value: String,
    /// Gas limit
    pub gas: u64,
    /// Gas price, always zero
    pub gas_price: u64,
}

impl SimulationRequest {
    /// Builds the request body for `params`.
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            save: false,
            save_if_fails: false,
            simulation_type: SIMULATION_TYPE.to_string(),
            network_id: params.network_id.to_string(),
            from: params.owner,
            to: params.entry_point,
            input: encode_exec_call(params.runtime_code.clone(), params.wallet_salt),
            value: params.value.to_string(),
            gas: params.gas,
            gas_price: 0,
        }
    }
}

/// The simulator's response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationResponse {
    /// The simulated transaction
    pub transaction: TransactionReport,
}

/// Report on the simulated transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionReport {
    /// Set when the transaction failed
    #[serde(default)]
    pub error_message: Option<String>,
    /// Execution details
    #[serde(default)]
    pub transaction_info: Option<TransactionInfo>,
}

impl TransactionReport {
    /// The revert message, if the transaction failed. Empty messages count as success.
    pub fn revert_reason(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|msg| !msg.is_empty())
    }
}

/// Execution details of the simulated transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInfo {
    /// Emitted logs, in execution order
    #[serde(default)]
    pub logs: Option<Vec<LogRecord>>,
    /// Balance changes
    #[serde(default)]
    pub balance_diff: Option<Vec<RawBalanceDiff>>,
}

impl TransactionInfo {
    /// The raw logs, in simulator order.
    pub fn raw_logs(&self) -> Vec<RawLog> {
        self.logs.iter().flatten().map(|record| record.raw.clone()).collect()
    }

    /// The raw balance diffs, in simulator order.
    pub fn raw_balance_diffs(&self) -> &[RawBalanceDiff] {
        self.balance_diff.as_deref().unwrap_or_default()
    }
}

/// A log entry as reported by the simulator.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    /// The undecoded log
    pub raw: RawLog,
}

/// An undecoded log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLog {
    /// Emitting contract
    pub address: Address,
    /// Topics. `None` marks a log the simulator could not tag with a signature.
    #[serde(default)]
    pub topics: Option<Vec<B256>>,
    /// Non-indexed data
    #[serde(default)]
    pub data: Bytes,
}

/// A balance change as reported by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawBalanceDiff {
    /// The account
    pub address: Address,
    /// Balance before execution, hex or decimal
    pub original: String,
    /// Balance after execution, hex or decimal
    pub dirty: String,
}

/// Decoded result of a successful simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// One entry per raw log, in simulator order
    pub logs: Vec<LogEntry>,
    /// Balance changes, in simulator order
    pub balance_diffs: Vec<BalanceDiff>,
}

impl SimulationOutcome {
    /// Logs that were decoded against an event, or passed through as opaque data.
    pub fn decoded(&self) -> impl Iterator<Item = &crate::DecodedLog> {
        self.logs.iter().filter_map(LogEntry::as_decoded)
    }

    /// Logs that carried a signature no supplied ABI knows.
    pub fn undecoded(&self) -> impl Iterator<Item = &RawLog> {
        self.logs.iter().filter_map(|entry| match entry {
            LogEntry::Undecoded(raw) => Some(raw),
            _ => None,
        })
    }
}

//! Fixtures shared by unit and integration tests.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use serde_json::{json, Value};

use crate::InterfaceDescriptor;

/// Signature of the event emitted by [`foo_descriptor`].
pub const FOO_SIGNATURE: &str = "Foo(uint256)";

/// A standard-JSON compiler output holding one unit in file `main`, with one warning diagnostic
/// per entry of `warnings`.
pub fn compiler_output_json(unit: &str, runtime_code: &str, warnings: &[&str]) -> String {
    let errors: Vec<Value> = warnings
        .iter()
        .map(|message| {
            json!({
                "component": "general",
                "errorCode": "5159",
                "formattedMessage": message,
                "message": message,
                "severity": "warning",
                "type": "Warning"
            })
        })
        .collect();

    let mut units = serde_json::Map::new();
    units.insert(
        unit.to_string(),
        json!({
            "abi": foo_descriptor(),
            "evm": { "deployedBytecode": { "object": runtime_code } }
        }),
    );

    json!({
        "errors": errors,
        "sources": { "main": { "id": 0 } },
        "contracts": { "main": units }
    })
    .to_string()
}

/// The interface of a unit declaring `event Foo(uint256 x)` and a payable fallback.
pub fn foo_descriptor() -> InterfaceDescriptor {
    serde_json::from_value(json!([
        {
            "anonymous": false,
            "inputs": [{ "indexed": false, "internalType": "uint256", "name": "x", "type": "uint256" }],
            "name": "Foo",
            "type": "event"
        },
        { "stateMutability": "payable", "type": "fallback" }
    ]))
    .expect("valid descriptor")
}

/// A raw simulator log record.
pub fn log_json(address: Address, topics: Option<&[B256]>, data: &Bytes) -> Value {
    json!({
        "name": null,
        "anonymous": false,
        "raw": { "address": address, "topics": topics, "data": data }
    })
}

/// A log record of `Foo(value)`.
pub fn foo_log_json(address: Address, value: u64) -> Value {
    let data = Bytes::copy_from_slice(&U256::from(value).to_be_bytes::<32>());
    log_json(address, Some(&[keccak256(FOO_SIGNATURE)][..]), &data)
}

/// A balance diff record with hex encoded balances.
pub fn balance_diff_json(address: Address, original: U256, dirty: U256) -> Value {
    json!({
        "address": address,
        "original": format!("0x{original:x}"),
        "dirty": format!("0x{dirty:x}"),
        "is_miner": false
    })
}

/// A successful transaction report.
pub fn success_response(logs: Vec<Value>, balance_diffs: Vec<Value>) -> Value {
    json!({
        "transaction": {
            "hash": B256::ZERO.to_string(),
            "status": true,
            "error_message": "",
            "transaction_info": {
                "logs": logs,
                "balance_diff": balance_diffs
            }
        },
        "simulation": { "id": "sim" }
    })
}

/// A reverted transaction report.
pub fn revert_response(message: &str) -> Value {
    json!({
        "transaction": {
            "status": false,
            "error_message": message,
            "transaction_info": { "logs": null, "balance_diff": null }
        }
    })
}

//! Calldata for the wallet entry point.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    /// The pre-deployed entry point that runs arbitrary runtime code in a simulated wallet.
    interface IWalletEntryPoint {
        function exec(bytes runtimeCode, bytes callData, uint256 walletSalt) external payable;
    }
}

/// Encodes `exec(runtimeCode, "", walletSalt)`.
///
/// Call data is always empty: the synthesized unit does all of its work in its fallback.
pub fn encode_exec_call(runtime_code: Bytes, wallet_salt: U256) -> Bytes {
    IWalletEntryPoint::execCall {
        runtimeCode: runtime_code,
        callData: Bytes::new(),
        walletSalt: wallet_salt,
    }
    .abi_encode()
    .into()
}

//! Constants for fragment synthesis, compilation and simulation.
//!
//! They are grouped by the pipeline stage that uses them.

/// Constants for the synthesized contract unit.
pub mod synth {
    /// Prefix of every synthesized unit name. The content-hash suffix is appended to it.
    pub const UNIT_NAME_PREFIX: &str = "WalletOperation";

    /// Number of leading digest bytes used for the unit name suffix.
    pub const UNIT_NAME_HASH_BYTES: usize = 4;

    /// License header emitted at the top of every synthesized source.
    pub const LICENSE_HEADER: &str = "// SPDX-License-Identifier: UNLICENSED";
}

/// Constants for the standard-JSON compile request.
pub mod compile {
    /// The language tag of the compile request.
    pub const LANGUAGE: &str = "Solidity";

    /// The logical file name holding the synthesized source.
    pub const SOURCE_FILE: &str = "main";

    /// Number of optimizer runs.
    pub const OPTIMIZER_RUNS: u32 = 200;

    /// Artifacts requested for the synthesized unit.
    pub const DEFAULT_OUTPUT_SELECTION: [&str; 2] = ["evm.deployedBytecode.object", "abi"];
}

/// Constants for the remote simulator.
pub mod simulate {
    /// Default base URL of the simulation API.
    pub const DEFAULT_BASE_URL: &str = "https://api.tenderly.co";

    /// Header carrying the access key.
    pub const ACCESS_KEY_HEADER: &str = "X-Access-Key";

    /// Simulation mode sent with every request.
    pub const SIMULATION_TYPE: &str = "quick";

    /// Environment variable holding the account name.
    pub const USER_ENV: &str = "TENDERLY_USER";

    /// Environment variable holding the project name.
    pub const PROJECT_ENV: &str = "TENDERLY_PROJECT";

    /// Environment variable holding the access key.
    pub const ACCESS_KEY_ENV: &str = "TENDERLY_ACCESS_KEY";

    /// Environment variable overriding [`DEFAULT_BASE_URL`].
    pub const BASE_URL_ENV: &str = "TENDERLY_BASE_URL";
}

use alloy_primitives::hex::FromHexError;
use reqwest::StatusCode;

/// Errors raised while turning a fragment into a [`crate::CompileResult`].
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The compiler reported one or more error-severity diagnostics. The message holds every
    /// formatted diagnostic, newline-joined, in compiler order.
    #[error("Compilation failed:\n{0}")]
    CompilationFailed(String),

    /// The compiler produced no artifact for the synthesized unit.
    #[error("No compiled unit found in source file '{file}'")]
    LookupFailed {
        /// The logical source file that was searched
        file: String,
    },

    /// The compiler produced an artifact for the unit but no runtime bytecode
    #[error("Compiled unit '{unit}' has no runtime bytecode")]
    MissingBytecode {
        /// The unit whose bytecode is missing
        unit: String,
    },

    /// The compile request could not be serialized
    #[error("Invalid compile request: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// The compiler could not be invoked or exited abnormally
    #[error("Failed to invoke compiler: {0}")]
    Invocation(String),

    /// The compiler failed to spawn or its pipes broke
    #[error("Compiler I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compiler output is not a valid standard-JSON document
    #[error("Malformed compiler output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    /// The runtime code is not valid hex
    #[error("Invalid runtime bytecode: {0}")]
    InvalidBytecode(#[from] FromHexError),
}

/// Failures reaching the simulator or understanding its answer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The simulator answered with a non-success status
    #[error("Simulator returned {status}: {body}")]
    Status {
        /// The HTTP status code
        status: StatusCode,
        /// The response body, as text
        body: String,
    },

    /// The response body is not a transaction report
    #[error("Malformed simulator response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A balance in the response is neither hex nor decimal
    #[error("Invalid balance value '{0}'")]
    InvalidBalance(String),
}

/// Errors raised by [`crate::SimulationClient::simulate`].
#[derive(Debug, thiserror::Error)]
pub enum SimulateError {
    /// The simulated transaction reverted. Carries the simulator's error message verbatim.
    #[error("Simulated transaction reverted: {0}")]
    Revert(String),

    /// The simulator could not be reached or answered with something unusable
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SimulateError {
    /// Returns `true` if the simulated transaction itself reverted.
    pub const fn is_revert(&self) -> bool {
        matches!(self, Self::Revert(_))
    }

    /// Returns `true` if the failure happened before a transaction report was obtained.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the revert message, if the transaction reverted.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Revert(reason) => Some(reason),
            Self::Transport(_) => None,
        }
    }
}

impl From<reqwest::Error> for SimulateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Http(err))
    }
}

/// Top-level error of the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Compilation stage error
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Simulation stage error
    #[error(transparent)]
    Simulate(#[from] SimulateError),

    /// Invalid or missing configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for the crate
pub type Result<T> = std::result::Result<T, Error>;

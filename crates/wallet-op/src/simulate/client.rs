//! HTTP client for the remote transaction simulator.

use serde::de::Error as _;
use tracing::{debug, info, warn};

use crate::{
    constants::simulate::ACCESS_KEY_HEADER, decode_logs, extract_balance_diffs, SimulateError,
    SimulationOutcome, SimulationParams, SimulationRequest, SimulationResponse, SimulatorConfig,
    TransportError,
};

/// Submits compiled fragments to the simulator, one request per call.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    http: reqwest::Client,
    config: SimulatorConfig,
}

impl SimulationClient {
    /// Creates a client with a default HTTP client.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Creates a client reusing an existing HTTP client and its connection pool.
    pub const fn with_http_client(http: reqwest::Client, config: SimulatorConfig) -> Self {
        Self { http, config }
    }

    /// The configuration this client submits with.
    pub const fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Executes the runtime code in `params` through the entry point and decodes the result.
    ///
    /// A transaction report carrying an error message fails with [`SimulateError::Revert`];
    /// anything that prevents obtaining a report fails with [`SimulateError::Transport`].
    pub async fn simulate(
        &self,
        params: &SimulationParams,
    ) -> Result<SimulationOutcome, SimulateError> {
        let url = self.config.simulate_url();
        let body = SimulationRequest::from_params(params);
        debug!(
            %url,
            network_id = params.network_id,
            entry_point = %params.entry_point,
            owner = %params.owner,
            code_len = params.runtime_code.len(),
            "Submitting simulation"
        );

        let response = self
            .http
            .post(&url)
            .header(ACCESS_KEY_HEADER, &self.config.auth.access_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(%status, "Simulator rejected request");
            return Err(TransportError::Status { status, body }.into());
        }

        let report = serde_json::from_slice::<SimulationResponse>(&bytes)
            .map_err(TransportError::Decode)?
            .transaction;

        if let Some(reason) = report.revert_reason() {
            warn!(%reason, "Simulated transaction reverted");
            return Err(SimulateError::Revert(reason.to_string()));
        }

        let info = report.transaction_info.ok_or_else(|| {
            TransportError::Decode(serde_json::Error::missing_field("transaction_info"))
        })?;

        let logs = decode_logs(&info.raw_logs(), &params.abis);
        let balance_diffs = extract_balance_diffs(info.raw_balance_diffs())?;
        let outcome = SimulationOutcome { logs, balance_diffs };
        info!(
            logs = outcome.logs.len(),
            undecoded = outcome.undecoded().count(),
            balance_diffs = outcome.balance_diffs.len(),
            "Simulation succeeded"
        );
        Ok(outcome)
    }
}

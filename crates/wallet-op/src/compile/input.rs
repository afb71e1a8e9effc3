//! The standard-JSON compile request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    constants::compile::{DEFAULT_OUTPUT_SELECTION, LANGUAGE, OPTIMIZER_RUNS, SOURCE_FILE},
    synthesize, CompileError, FragmentSpec, SynthesizedUnit,
};

/// A standard-JSON compiler input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInput {
    /// The source language, always `Solidity`
    pub language: String,
    /// Logical source name to source text
    pub sources: BTreeMap<String, Source>,
    /// Optimizer and output settings
    pub settings: Settings,
}

/// A single source file of the compile request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// The source text
    pub content: String,
}

/// Compiler settings of the compile request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Optimizer configuration
    pub optimizer: Optimizer,
    /// Whether to compile through the IR pipeline. Left to the compiler default when unset.
    #[serde(rename = "viaIR", default, skip_serializing_if = "Option::is_none")]
    pub via_ir: Option<bool>,
    /// File name to unit name to requested artifacts
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// Optimizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimizer {
    /// Whether the optimizer runs
    pub enabled: bool,
    /// Expected number of contract executions the optimizer tunes for
    pub runs: u32,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self { enabled: true, runs: OPTIMIZER_RUNS }
    }
}

impl CompilerInput {
    /// Builds the request for a synthesized unit, asking for its runtime bytecode and ABI.
    pub fn new(unit: &SynthesizedUnit) -> Self {
        Self::with_output_selection(unit, DEFAULT_OUTPUT_SELECTION)
    }

    /// Builds the request for a synthesized unit, asking for the given artifacts only.
    pub fn with_output_selection<I, S>(unit: &SynthesizedUnit, artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selection = BTreeMap::from([(
            unit.name.clone(),
            artifacts.into_iter().map(Into::into).collect(),
        )]);

        Self {
            language: LANGUAGE.to_string(),
            sources: BTreeMap::from([(
                SOURCE_FILE.to_string(),
                Source { content: unit.source.clone() },
            )]),
            settings: Settings {
                optimizer: Optimizer::default(),
                via_ir: None,
                output_selection: BTreeMap::from([(SOURCE_FILE.to_string(), selection)]),
            },
        }
    }

    /// Synthesizes the unit for `spec` and builds its request.
    pub fn from_spec(spec: &FragmentSpec) -> Self {
        Self::new(&synthesize(spec))
    }

    /// Serializes the request to JSON.
    pub fn to_json(&self) -> Result<String, CompileError> {
        serde_json::to_string(self).map_err(CompileError::InvalidInput)
    }

    /// Returns the name of the (single) unit this request selects output for.
    pub fn unit_name(&self) -> Option<&str> {
        self.settings.output_selection.get(SOURCE_FILE)?.keys().next().map(String::as_str)
    }
}

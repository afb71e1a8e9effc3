//! Parsing of the standard-JSON compiler output.

use std::collections::BTreeMap;

use alloy_json_abi::{AbiItem, Event};
use alloy_primitives::{hex, Bytes};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::{constants::compile::SOURCE_FILE, CompileError};

/// An interface descriptor: ABI entries in the order the compiler emitted them.
pub type InterfaceDescriptor = Vec<AbiItem<'static>>;

/// Severity of a compiler diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fatal, no artifacts are usable
    Error,
    /// Non-fatal, returned alongside the result
    Warning,
    /// Informational, ignored
    Info,
}

/// Location a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceLocation {
    /// Logical source file
    pub file: String,
    /// Start byte offset
    pub start: i64,
    /// End byte offset
    pub end: i64,
}

/// A diagnostic reported by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerDiagnostic {
    /// Where the diagnostic points, if anywhere
    #[serde(default)]
    pub source_location: Option<SourceLocation>,
    /// Diagnostic class, e.g. `TypeError` or `Warning`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Severity
    pub severity: Severity,
    /// Compiler specific diagnostic code
    #[serde(default, deserialize_with = "deserialize_error_code")]
    pub error_code: Option<String>,
    /// Short message
    #[serde(default)]
    pub message: String,
    /// Message with source excerpt
    #[serde(default)]
    pub formatted_message: String,
}

impl CompilerDiagnostic {
    /// The formatted message, falling back to the short message when the compiler omitted it.
    pub fn formatted(&self) -> &str {
        if self.formatted_message.is_empty() {
            &self.message
        } else {
            &self.formatted_message
        }
    }
}

/// Solc emits error codes as strings, other front ends as numbers.
fn deserialize_error_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(code)) => Some(code),
        Some(serde_json::Value::Number(code)) => Some(code.to_string()),
        _ => None,
    })
}

/// Compiled artifacts of one unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractArtifact {
    /// The interface descriptor
    #[serde(default)]
    pub abi: InterfaceDescriptor,
    /// EVM outputs
    #[serde(default)]
    pub evm: EvmArtifact,
}

/// EVM outputs of one unit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmArtifact {
    /// The runtime (deployed) bytecode
    #[serde(default)]
    pub deployed_bytecode: BytecodeObject,
}

/// A bytecode object as emitted by the compiler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BytecodeObject {
    /// Hex encoded bytecode, usually without a `0x` prefix
    #[serde(default)]
    pub object: String,
}

/// A standard-JSON compiler output document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerOutput {
    /// All diagnostics, in compiler order
    #[serde(default)]
    pub errors: Vec<CompilerDiagnostic>,
    /// File name to unit name to artifacts
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, ContractArtifact>>,
}

/// The usable outcome of compiling a synthesized unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileResult {
    /// ABI entries in compiler order
    pub abi: InterfaceDescriptor,
    /// Runtime bytecode as hex, without a `0x` prefix
    pub runtime_code: String,
    /// Formatted warning-severity diagnostics, in compiler order
    pub warnings: Vec<String>,
}

impl CompileResult {
    /// Decodes [`Self::runtime_code`] into bytes.
    pub fn runtime_bytes(&self) -> Result<Bytes, CompileError> {
        Ok(hex::decode(&self.runtime_code)?.into())
    }

    /// Iterates over the event entries of the ABI.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.abi.iter().filter_map(|item| match item {
            AbiItem::Event(event) => Some(&**event),
            _ => None,
        })
    }
}

impl CompilerOutput {
    /// Parses a raw compiler output document.
    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Diagnostics with the given severity, in compiler order.
    pub fn diagnostics(&self, severity: Severity) -> impl Iterator<Item = &CompilerDiagnostic> {
        self.errors.iter().filter(move |diag| diag.severity == severity)
    }

    /// Returns `true` if any diagnostic is fatal.
    pub fn has_errors(&self) -> bool {
        self.diagnostics(Severity::Error).next().is_some()
    }

    /// Extracts the single synthesized unit's ABI, runtime code and warnings.
    ///
    /// Any error-severity diagnostic fails the whole result with
    /// [`CompileError::CompilationFailed`]; no partial result is returned.
    pub fn into_result(mut self) -> Result<CompileResult, CompileError> {
        if self.has_errors() {
            let message = self
                .diagnostics(Severity::Error)
                .map(CompilerDiagnostic::formatted)
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CompileError::CompilationFailed(message));
        }

        let warnings: Vec<String> =
            self.diagnostics(Severity::Warning).map(|diag| diag.formatted().to_string()).collect();
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "Compiler reported warnings");
        }

        let (unit, artifact) = self
            .contracts
            .remove(SOURCE_FILE)
            .and_then(|units| units.into_iter().next())
            .ok_or_else(|| CompileError::LookupFailed { file: SOURCE_FILE.to_string() })?;

        let object = artifact.evm.deployed_bytecode.object;
        let runtime_code = object.strip_prefix("0x").map(str::to_string).unwrap_or(object);
        if runtime_code.is_empty() {
            return Err(CompileError::MissingBytecode { unit });
        }
        debug!(%unit, abi_len = artifact.abi.len(), code_len = runtime_code.len(), "Compiled unit");

        Ok(CompileResult { abi: artifact.abi, runtime_code, warnings })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn diagnostic(severity: &str, formatted: &str) -> serde_json::Value {
        json!({
            "sourceLocation": { "file": "main", "start": 10, "end": 20 },
            "type": if severity == "error" { "TypeError" } else { "Warning" },
            "component": "general",
            "severity": severity,
            "errorCode": "5667",
            "message": "short",
            "formattedMessage": formatted,
        })
    }

    fn output(errors: Vec<serde_json::Value>, contracts: serde_json::Value) -> CompilerOutput {
        let doc = json!({ "errors": errors, "contracts": contracts, "sources": {} });
        CompilerOutput::from_json(&doc.to_string()).unwrap()
    }

    fn unit_bucket(code: &str) -> serde_json::Value {
        json!({
            "main": {
                "WalletOperation_deadbeef": {
                    "abi": [
                        {
                            "anonymous": false,
                            "inputs": [{ "indexed": false, "internalType": "uint256", "name": "", "type": "uint256" }],
                            "name": "Result",
                            "type": "event"
                        },
                        { "stateMutability": "payable", "type": "fallback" }
                    ],
                    "evm": { "deployedBytecode": { "object": code } }
                }
            }
        })
    }

    #[test]
    fn test_success_with_warnings() {
        let out = output(
            vec![
                diagnostic("warning", "Warning: selfdestruct has been deprecated."),
                diagnostic("info", "Info: ignored"),
            ],
            unit_bucket("6080604052"),
        );
        let result = out.into_result().unwrap();
        assert_eq!(result.abi.len(), 2);
        assert_eq!(result.runtime_code, "6080604052");
        assert_eq!(result.warnings, vec!["Warning: selfdestruct has been deprecated.".to_string()]);
        assert_eq!(result.events().count(), 1);
        assert_eq!(result.runtime_bytes().unwrap().len(), 5);
    }

    #[test]
    fn test_abi_keeps_compiler_order() {
        let result = output(vec![], unit_bucket("00")).into_result().unwrap();
        assert!(matches!(result.abi[0], AbiItem::Event(_)));
        assert!(matches!(result.abi[1], AbiItem::Fallback(_)));
    }

    #[test]
    fn test_errors_are_joined_in_order() {
        let out = output(
            vec![
                diagnostic("error", "TypeError: first"),
                diagnostic("warning", "Warning: not included"),
                diagnostic("error", "ParserError: second"),
            ],
            json!({}),
        );
        match out.into_result() {
            Err(CompileError::CompilationFailed(msg)) => {
                assert_eq!(msg, "TypeError: first\nParserError: second")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_errors_win_over_artifacts() {
        let out = output(vec![diagnostic("error", "DeclarationError: x")], unit_bucket("00"));
        assert!(matches!(out.into_result(), Err(CompileError::CompilationFailed(_))));
    }

    #[test]
    fn test_missing_unit_is_lookup_failure() {
        let out = output(vec![], json!({ "main": {} }));
        assert!(matches!(out.into_result(), Err(CompileError::LookupFailed { file }) if file == "main"));

        let out = output(vec![], json!({}));
        assert!(matches!(out.into_result(), Err(CompileError::LookupFailed { .. })));
    }

    #[test]
    fn test_missing_bytecode_is_rejected() {
        let doc = r#"{"contracts":{"main":{"WalletOperation_deadbeef":{"abi":[]}}}}"#;
        let err = CompilerOutput::from_json(doc).unwrap().into_result().unwrap_err();
        assert!(matches!(
            &err,
            CompileError::MissingBytecode { unit } if unit == "WalletOperation_deadbeef"
        ));

        for code in ["", "0x"] {
            let out = output(vec![], unit_bucket(code));
            assert!(matches!(out.into_result(), Err(CompileError::MissingBytecode { .. })));
        }
    }

    #[test]
    fn test_prefixed_bytecode_is_stripped() {
        let result = output(vec![], unit_bucket("0x6080")).into_result().unwrap();
        assert_eq!(result.runtime_code, "6080");
    }

    #[test]
    fn test_formatted_falls_back_to_message() {
        let diag: CompilerDiagnostic = serde_json::from_value(json!({
            "severity": "warning",
            "errorCode": 1234,
            "message": "bare message",
        }))
        .unwrap();
        assert_eq!(diag.formatted(), "bare message");
        assert_eq!(diag.error_code.as_deref(), Some("1234"));
    }

    #[test]
    fn test_invalid_output_is_malformed() {
        assert!(matches!(
            CompilerOutput::from_json("not json"),
            Err(CompileError::MalformedOutput(_))
        ));
    }
}

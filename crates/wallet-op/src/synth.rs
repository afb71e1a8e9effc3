//! Synthesis of a compilable contract unit around a caller-supplied fragment.

use alloy_primitives::hex;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::constants::synth::{LICENSE_HEADER, UNIT_NAME_HASH_BYTES, UNIT_NAME_PREFIX};

/// A fallback fragment together with the declarations it depends on.
///
/// The fragment is trusted input: it is spliced into the fallback body as-is and any mistake
/// surfaces later as a compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpec {
    /// Body of the synthesized `fallback()` function
    pub fragment: String,
    /// Compiler version used in the `pragma solidity` line, e.g. `0.8.24` or `^0.8.0`
    pub version: String,
    /// Top-level declarations (interfaces, libraries, ...) emitted before the unit
    pub extra_outer_defs: Vec<String>,
    /// Declarations (events, errors, ...) emitted inside the unit
    pub extra_inner_defs: Vec<String>,
}

impl FragmentSpec {
    /// Creates a spec without extra declarations.
    pub fn new(fragment: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            version: version.into(),
            extra_outer_defs: Vec::new(),
            extra_inner_defs: Vec::new(),
        }
    }

    /// Appends top-level declarations.
    pub fn with_outer_defs<I, S>(mut self, defs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_outer_defs.extend(defs.into_iter().map(Into::into));
        self
    }

    /// Appends unit-scoped declarations.
    pub fn with_inner_defs<I, S>(mut self, defs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_inner_defs.extend(defs.into_iter().map(Into::into));
        self
    }
}

/// A named, complete source unit ready to be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedUnit {
    /// The contract name, `WalletOperation_<hex>`
    pub name: String,
    /// The full source text
    pub source: String,
}

/// Derives the unit name from the fragment's content.
///
/// Identical fragments always map to the same name, so the name doubles as a compile cache key.
pub fn unit_name(fragment: &str) -> String {
    let digest = Sha256::digest(fragment.as_bytes());
    format!("{UNIT_NAME_PREFIX}_{}", hex::encode(&digest[..UNIT_NAME_HASH_BYTES]))
}

/// Wraps the fragment into a uniquely named contract.
pub fn synthesize(spec: &FragmentSpec) -> SynthesizedUnit {
    let name = unit_name(&spec.fragment);
    debug!(
        unit = %name,
        outer_defs = spec.extra_outer_defs.len(),
        inner_defs = spec.extra_inner_defs.len(),
        "Synthesizing unit"
    );
    let source = render_source(spec, &name);
    SynthesizedUnit { name, source }
}

/// Wraps the fragment into a contract with the fixed name `WalletOperation`.
///
/// Meant for in-browser compilation where only one unit ever exists and name collisions cannot
/// happen.
pub fn synthesize_browser_source(spec: &FragmentSpec) -> String {
    render_source(spec, UNIT_NAME_PREFIX)
}

fn render_source(spec: &FragmentSpec, name: &str) -> String {
    format!(
        r#"{LICENSE_HEADER}
pragma solidity {version};

{outer}

contract {name} {{

{inner}

    fallback() external payable {{
{fragment}
    }}
}}
"#,
        version = spec.version,
        outer = spec.extra_outer_defs.join("\n"),
        inner = spec.extra_inner_defs.join("\n"),
        fragment = spec.fragment,
    )
}

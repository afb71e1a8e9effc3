//! The compiler boundary.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use tracing::{debug, trace};

use crate::{synthesize, CompileError, CompileResult, CompilerInput, CompilerOutput, FragmentSpec};

/// A standard-JSON compiler.
///
/// Implementations are pure from the pipeline's point of view: one input document in, one
/// output document out.
pub trait Compiler {
    /// Compiles the given input document.
    fn compile(&self, input: &CompilerInput) -> Result<CompilerOutput, CompileError>;
}

impl<F> Compiler for F
where
    F: Fn(&CompilerInput) -> Result<CompilerOutput, CompileError>,
{
    fn compile(&self, input: &CompilerInput) -> Result<CompilerOutput, CompileError> {
        self(input)
    }
}

/// A `solc` executable driven through `--standard-json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solc {
    /// Path (or name on `PATH`) of the executable
    pub path: PathBuf,
}

impl Default for Solc {
    fn default() -> Self {
        Self::new("solc")
    }
}

impl Solc {
    /// Creates a compiler backed by the executable at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `true` if the executable can be run.
    pub fn is_available(&self) -> bool {
        Command::new(&self.path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    /// Queries the compiler version, without build metadata.
    pub fn version(&self) -> Result<semver::Version, CompileError> {
        let output = Command::new(&self.path).arg("--version").stderr(Stdio::null()).output()?;
        if !output.status.success() {
            return Err(CompileError::Invocation(format!(
                "'{} --version' exited with {}",
                self.path.display(),
                output.status
            )));
        }
        parse_version(&String::from_utf8_lossy(&output.stdout))
    }
}

impl Compiler for Solc {
    fn compile(&self, input: &CompilerInput) -> Result<CompilerOutput, CompileError> {
        let json = input.to_json()?;
        debug!(solc = %self.path.display(), unit = ?input.unit_name(), "Invoking compiler");

        let mut child = Command::new(&self.path)
            .arg("--standard-json")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Dropping stdin closes the pipe so the compiler sees EOF.
        child
            .stdin
            .take()
            .ok_or_else(|| CompileError::Invocation("compiler stdin unavailable".to_string()))?
            .write_all(json.as_bytes())?;

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(CompileError::Invocation(format!(
                "'{} --standard-json' exited with {}: {}",
                self.path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(output = %stdout, "Compiler output");
        CompilerOutput::from_json(&stdout)
    }
}

/// Extracts the version from `solc --version` output, e.g.
/// `Version: 0.8.24+commit.e11b9ed9.Linux.g++` becomes `0.8.24`.
fn parse_version(text: &str) -> Result<semver::Version, CompileError> {
    let raw = text
        .lines()
        .find_map(|line| line.trim().strip_prefix("Version:"))
        .map(str::trim)
        .ok_or_else(|| CompileError::Invocation(format!("unrecognized version output: {text}")))?;

    let core = raw.split(['+', '-']).next().unwrap_or(raw);
    semver::Version::parse(core)
        .map_err(|e| CompileError::Invocation(format!("invalid compiler version '{raw}': {e}")))
}

/// Synthesizes, compiles and parses a fragment in one go.
pub fn compile_fragment<C>(compiler: &C, spec: &FragmentSpec) -> Result<CompileResult, CompileError>
where
    C: Compiler + ?Sized,
{
    let unit = synthesize(spec);
    let input = CompilerInput::new(&unit);
    compiler.compile(&input)?.into_result()
}

//! Output of compiling and validating a strategy submission.

/// Result of compiling (and artifact-validating) a strategy submission.
#[derive(Debug, Clone, Default)]
pub struct CompiledArtifact {
    /// Creation bytecode, empty on failure.
    pub bytecode: Vec<u8>,
    /// The contract's ABI as emitted by the compiler, empty on failure.
    pub abi: serde_json::Value,
    pub success: bool,
    /// Ordered diagnostics; empty iff `success`.
    pub errors: Vec<String>,
}

impl CompiledArtifact {
    pub fn failure(errors: Vec<String>) -> Self {
        Self { bytecode: Vec::new(), abi: serde_json::Value::Null, success: false, errors }
    }

    pub fn success(bytecode: Vec<u8>, abi: serde_json::Value) -> Self {
        Self { bytecode, abi, success: true, errors: Vec::new() }
    }
}

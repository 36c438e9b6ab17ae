//! Compiles validated strategy source into deployable bytecode and enforces
//! artifact-level policy: forbidden opcodes in both runtime and creation
//! bytecode, and storage declared outside the base contract's reserved slots.
//!
//! This is the authoritative defense layer. The source validator catches
//! obvious hostile patterns cheaply, but a submitter can in principle
//! synthesize source that slips past lexical rules; nothing reaches the
//! sandbox without passing the checks here first.

pub mod artifact;
pub mod error;
pub mod opcodes;
pub mod solc;
pub mod storage;

pub use artifact::CompiledArtifact;
pub use error::CompilerError;

/// Compiles Solidity strategy source and enforces bytecode/storage policy.
#[derive(Debug, Default)]
pub struct SolidityCompiler;

impl SolidityCompiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile(&self, source: &str) -> CompiledArtifact {
        self.compile_named(source, "Strategy")
    }

    pub fn compile_named(&self, source: &str, contract_name: &str) -> CompiledArtifact {
        let output = match solc::run_solc(source, contract_name) {
            Ok(output) => output,
            Err(e) => return CompiledArtifact::failure(vec![e.to_string()]),
        };

        let mut errors = Vec::new();

        if !opcodes::scan_forbidden(&output.runtime_bytecode).is_empty() {
            errors.push("runtime bytecode contains forbidden opcodes".to_string());
        }
        if !opcodes::scan_forbidden(&output.creation_bytecode).is_empty() {
            errors.push("creation bytecode contains forbidden opcodes".to_string());
        }
        errors.extend(storage::check_storage_layout(&output.storage_layout));

        if errors.is_empty() {
            CompiledArtifact::success(output.creation_bytecode, output.abi)
        } else {
            CompiledArtifact::failure(errors)
        }
    }
}

//! Shells out to an external `solc` binary and parses its combined-JSON
//! output, the same way `cli::compile_strategy` shells out to `rustc`.

use std::io::Write;
use std::process::Command;

use serde_json::Value;

use crate::compiler::error::CompilerError;

const SOLC_BINARY: &str = "solc";

/// The pieces of `solc`'s combined-json output this compiler cares about.
pub struct SolcOutput {
    pub creation_bytecode: Vec<u8>,
    pub runtime_bytecode: Vec<u8>,
    pub abi: Value,
    pub storage_layout: Value,
}

/// Compile `source` and extract the artifact for `contract_name`.
pub fn run_solc(source: &str, contract_name: &str) -> Result<SolcOutput, CompilerError> {
    let mut file = tempfile::Builder::new().suffix(".sol").tempfile()?;
    file.write_all(source.as_bytes())?;
    let path = file.path();

    let output = Command::new(SOLC_BINARY)
        .arg("--combined-json")
        .arg("bin,bin-runtime,abi,storage-layout")
        .arg(path)
        .output()?;

    if !output.status.success() {
        return Err(CompilerError::SolcFailed(String::from_utf8_lossy(&output.stderr).into_owned()));
    }

    let parsed: Value =
        serde_json::from_slice(&output.stdout).map_err(|e| CompilerError::MalformedOutput(e.to_string()))?;

    let contracts = parsed
        .get("contracts")
        .and_then(Value::as_object)
        .ok_or_else(|| CompilerError::MalformedOutput("missing `contracts` object".into()))?;

    let entry = contracts
        .iter()
        .find(|(key, _)| key.ends_with(&format!(":{contract_name}")))
        .map(|(_, value)| value)
        .ok_or_else(|| CompilerError::ContractNotFound(contract_name.to_string()))?;

    let creation_hex = entry.get("bin").and_then(Value::as_str).unwrap_or_default();
    let runtime_hex = entry.get("bin-runtime").and_then(Value::as_str).unwrap_or_default();

    let creation_bytecode =
        hex::decode(creation_hex).map_err(|e| CompilerError::MalformedOutput(format!("bad `bin` hex: {e}")))?;
    let runtime_bytecode = hex::decode(runtime_hex)
        .map_err(|e| CompilerError::MalformedOutput(format!("bad `bin-runtime` hex: {e}")))?;

    let abi = entry.get("abi").cloned().unwrap_or(Value::Null);
    let storage_layout = entry.get("storage-layout").cloned().unwrap_or(Value::Null);

    Ok(SolcOutput { creation_bytecode, runtime_bytecode, abi, storage_layout })
}

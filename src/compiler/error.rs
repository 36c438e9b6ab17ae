//! Errors raised by the `solc` invocation layer.

#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error("failed to invoke solc: {0}")]
    Invocation(#[from] std::io::Error),

    #[error("solc exited with an error: {0}")]
    SolcFailed(String),

    #[error("failed to parse solc output: {0}")]
    MalformedOutput(String),

    #[error("contract `{0}` not found in solc output")]
    ContractNotFound(String),
}

//! Errors raised by the EVM sandbox.

/// Errors raised by `SandboxExecutor`.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("Deployment timed out")]
    DeploymentTimeout,

    #[error("afterSwap failed: Invalid return data length")]
    InvalidReturnDataLength,

    #[error("afterSwap failed: {0}")]
    ExecutionFailed(String),

    #[error("afterInitialize failed: {0}")]
    InitializationFailed(String),

    #[error("Out of gas")]
    OutOfGas,
}

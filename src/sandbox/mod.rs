//! EVM sandbox: deploys and calls submitted strategy bytecode in isolation.

pub mod error;
pub mod executor;

pub use error::SandboxError;
pub use executor::SandboxExecutor;

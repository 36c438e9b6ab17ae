//! Errors raised by the AMM engine.

/// Errors raised by `Pool` outside of the soft-fail trade path.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("pool not initialized")]
    NotInitialized,

    #[error("pool already initialized")]
    AlreadyInitialized,

    #[error("strategy error: {0}")]
    Strategy(String),
}

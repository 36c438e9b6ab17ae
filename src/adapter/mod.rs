//! Bridges sandboxed EVM strategies into the native `Strategy` trait.

pub mod strategy_adapter;

pub use strategy_adapter::EvmStrategyAdapter;

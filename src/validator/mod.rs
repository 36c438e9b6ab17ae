//! Source-level validation of submitted strategy text.

pub mod solidity;

pub use solidity::{SolidityValidator, ValidationResult};

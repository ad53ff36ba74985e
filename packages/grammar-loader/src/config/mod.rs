//! Verifier configuration
//!
//! Versioned YAML (v1):
//!
//! ```yaml
//! version: 1
//! abi:
//!   min: 14
//! grammars: [python, rust]
//! ```
//!
//! Omitted ABI bounds fall back to the runtime range; an empty grammar list
//! means every bundled grammar.

pub mod error;
pub mod verifier_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use verifier_config::{AbiBounds, VerifierConfig, SUPPORTED_VERSIONS};

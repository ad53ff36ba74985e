//! Error types for grammar-loader
//!
//! Load failures come in two classes. A *broken* artifact produced nothing
//! usable (null handle, empty tables). An *incompatible* artifact was built
//! for a different runtime ABI. Neither is retried: both are build-time
//! defects of the artifact.

use thiserror::Error;

use crate::version::AbiRange;

/// Failure to turn a grammar artifact into a [`LanguageDescriptor`](crate::LanguageDescriptor)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The entry point returned a null language handle
    #[error("Error loading {grammar} grammar: entry point returned a null language")]
    NullDescriptor { grammar: String },

    /// The ABI tag is outside the range the runtime accepts
    #[error(
        "Error loading {grammar} grammar: ABI version {found} is incompatible with this runtime (supported {min}..={max})"
    )]
    VersionMismatch {
        grammar: String,
        found: usize,
        min: usize,
        max: usize,
    },

    /// Non-null and version compatible, but the tables are unusable
    #[error("Error loading {grammar} grammar: {reason}")]
    Malformed { grammar: String, reason: String },
}

/// Coarse classification for operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// Grammar missing or broken (rebuild the artifact)
    Broken,
    /// Grammar built for another runtime version (version skew)
    Incompatible,
}

impl LoadError {
    pub fn null_descriptor(grammar: impl Into<String>) -> Self {
        Self::NullDescriptor {
            grammar: grammar.into(),
        }
    }

    pub fn version_mismatch(grammar: impl Into<String>, found: usize, supported: AbiRange) -> Self {
        Self::VersionMismatch {
            grammar: grammar.into(),
            found,
            min: supported.min(),
            max: supported.max(),
        }
    }

    pub fn malformed(grammar: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            grammar: grammar.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::NullDescriptor { .. } | Self::Malformed { .. } => LoadErrorKind::Broken,
            Self::VersionMismatch { .. } => LoadErrorKind::Incompatible,
        }
    }

    /// Name of the grammar that failed to load
    pub fn grammar(&self) -> &str {
        match self {
            Self::NullDescriptor { grammar }
            | Self::VersionMismatch { grammar, .. }
            | Self::Malformed { grammar, .. } => grammar,
        }
    }
}

/// Result type alias for load operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Invalid ABI range construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiRangeError {
    #[error("Invalid ABI range: min {min} is greater than max {max}")]
    Inverted { min: usize, max: usize },

    #[error("ABI range {min}..={max} is not within the runtime range {host_min}..={host_max}")]
    OutsideHost {
        min: usize,
        max: usize,
        host_min: usize,
        host_max: usize,
    },
}

/// Registry failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Grammar '{name}' is already registered with a different entry point")]
    NameCollision { name: String },

    #[error("Extension '{extension}' is already claimed by grammar '{owner}'")]
    ExtensionCollision { extension: String, owner: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_separates_build_defects_from_version_skew() {
        let range = AbiRange::host();
        assert_eq!(LoadError::null_descriptor("sql").kind(), LoadErrorKind::Broken);
        assert_eq!(
            LoadError::malformed("sql", "no node kinds").kind(),
            LoadErrorKind::Broken
        );
        assert_eq!(
            LoadError::version_mismatch("sql", 99, range).kind(),
            LoadErrorKind::Incompatible
        );
    }

    #[test]
    fn test_messages_name_the_grammar() {
        let err = LoadError::null_descriptor("clickhouse");
        assert_eq!(
            err.to_string(),
            "Error loading clickhouse grammar: entry point returned a null language"
        );
        assert_eq!(err.grammar(), "clickhouse");

        let err = LoadError::version_mismatch("clickhouse", 9, AbiRange::host());
        let msg = err.to_string();
        assert!(msg.starts_with("Error loading clickhouse grammar"));
        assert!(msg.contains("ABI version 9"));
    }

    #[test]
    fn test_registry_error_wraps_load_error_transparently() {
        let err: RegistryError = LoadError::null_descriptor("go").into();
        assert_eq!(err.to_string(), LoadError::null_descriptor("go").to_string());
    }
}

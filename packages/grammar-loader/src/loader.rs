//! Grammar loading and verification
//!
//! Check order matters:
//! 1. null handle            -> `NullDescriptor`
//! 2. ABI tag out of range   -> `VersionMismatch` (read before anything
//!    else touches the tables, whose layout depends on that version)
//! 3. empty symbol table, runtime refusal or no root for empty input
//!    -> `Malformed`
//!
//! Loading is side-effect free apart from the allocations, so calling it
//! again on the same artifact gives the same answer.

use tracing::{debug, error, info, warn};
use tree_sitter::{Language, Parser};

use crate::artifact::GrammarArtifact;
use crate::descriptor::LanguageDescriptor;
use crate::errors::{LoadError, Result};
use crate::version::AbiRange;

/// Loads artifacts and accepts those whose ABI lies in `abi`
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarLoader {
    abi: AbiRange,
}

impl GrammarLoader {
    /// Loader accepting the full runtime range
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abi_range(abi: AbiRange) -> Self {
        Self { abi }
    }

    pub fn abi_range(&self) -> AbiRange {
        self.abi
    }

    pub fn load(&self, artifact: &GrammarArtifact) -> Result<LanguageDescriptor> {
        let grammar = artifact.name();
        debug!(grammar, entry_point = ?artifact.entry_point(), "loading grammar");

        let Some(language) = artifact.entry_point().construct() else {
            error!(grammar, "entry point returned a null language");
            return Err(LoadError::null_descriptor(grammar));
        };

        // The version field sits at the head of every table layout, so it is
        // readable even when the rest of the layout is foreign to us.
        let abi_version = language.version();
        if !self.abi.contains(abi_version) {
            warn!(
                grammar,
                abi_version,
                supported = %self.abi,
                "grammar ABI version rejected"
            );
            return Err(LoadError::version_mismatch(grammar, abi_version, self.abi));
        }

        let descriptor = verify_tables(grammar, language, abi_version)?;

        info!(
            grammar,
            abi_version,
            node_kinds = descriptor.node_kind_count(),
            root_kind = descriptor.root_kind(),
            "grammar verified"
        );
        Ok(descriptor)
    }
}

/// Structural checks on a version-compatible language
fn verify_tables(
    grammar: &str,
    language: Language,
    abi_version: usize,
) -> Result<LanguageDescriptor> {
    if language.node_kind_count() == 0 {
        error!(grammar, "grammar declares no node kinds");
        return Err(LoadError::malformed(grammar, "grammar declares no node kinds"));
    }

    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&language) {
        // Only reachable when the loader's range is wider than the runtime's.
        warn!(grammar, abi_version, error = %e, "runtime refused language");
        return Err(LoadError::version_mismatch(
            grammar,
            abi_version,
            AbiRange::host(),
        ));
    }

    let tree = parser.parse("", None).ok_or_else(|| {
        error!(grammar, "parser produced no tree for empty input");
        LoadError::malformed(grammar, "parser produced no tree for empty input")
    })?;
    let root = tree.root_node();

    Ok(LanguageDescriptor::new(
        grammar,
        language,
        abi_version,
        root.kind(),
        root.kind_id(),
    ))
}

/// Load `artifact` with the runtime's own ABI range.
pub fn load_and_verify(artifact: &GrammarArtifact) -> Result<LanguageDescriptor> {
    GrammarLoader::new().load(artifact)
}

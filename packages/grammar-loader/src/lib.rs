/*
 * Grammar Loader - tree-sitter grammar verification
 *
 * Layout:
 * - artifact   : compiled grammar artifacts and their entry points
 * - loader     : load + verify into a LanguageDescriptor
 * - descriptor : immutable, shareable language handle
 * - registry   : process-wide descriptor registry
 * - bundled    : grammars linked into this build
 * - config/    : YAML verifier configuration
 *
 * A descriptor only exists once the artifact produced a non-null handle
 * whose ABI version the runtime accepts and whose tables yield a root node.
 */

pub mod artifact;
pub mod bundled;
pub mod config;
pub mod descriptor;
pub mod errors;
pub mod loader;
pub mod registry;
pub mod version;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use artifact::{BindingEntryPoint, EntryPoint, GrammarArtifact, RawEntryPoint};
pub use config::{ConfigError, ConfigResult, VerifierConfig};
pub use descriptor::{DescriptorSummary, LanguageDescriptor};
pub use errors::{AbiRangeError, LoadError, LoadErrorKind, RegistryError, Result};
pub use loader::{load_and_verify, GrammarLoader};
pub use registry::GrammarRegistry;
pub use version::AbiRange;

//! Compiled grammar artifacts
//!
//! A generated grammar exposes one well-known constructor. In C it is
//! `const TSLanguage *tree_sitter_<name>(void)`; Rust grammar crates wrap the
//! same symbol in a `fn language() -> Language`. Both shapes are accepted.

use std::fmt;

use tree_sitter::ffi::TSLanguage;
use tree_sitter::Language;

/// C entry point as declared in a grammar's generated header
pub type RawEntryPoint = unsafe extern "C" fn() -> *const TSLanguage;

/// Entry point as exported by a Rust grammar crate
pub type BindingEntryPoint = fn() -> Language;

#[derive(Clone, Copy)]
pub enum EntryPoint {
    Raw(RawEntryPoint),
    Binding(BindingEntryPoint),
}

impl EntryPoint {
    /// Call the constructor. `None` if it returned a null handle.
    ///
    /// The returned `Language` owns the handle and releases it on drop.
    pub(crate) fn construct(&self) -> Option<Language> {
        let raw = match *self {
            // SAFETY: grammar constructors take no arguments and return a
            // pointer to static parse tables (or null).
            EntryPoint::Raw(construct) => unsafe { construct() },
            EntryPoint::Binding(construct) => construct().into_raw(),
        };
        if raw.is_null() {
            return None;
        }
        // SAFETY: non-null handle produced by a grammar constructor.
        Some(unsafe { Language::from_raw(raw) })
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::Raw(_) => f.write_str("Raw"),
            EntryPoint::Binding(_) => f.write_str("Binding"),
        }
    }
}

/// A compiled grammar: its name, constructor and the file extensions it parses
#[derive(Debug, Clone)]
pub struct GrammarArtifact {
    name: String,
    entry_point: EntryPoint,
    extensions: Vec<String>,
}

impl GrammarArtifact {
    pub fn new(name: impl Into<String>, entry_point: EntryPoint) -> Self {
        Self {
            name: name.into(),
            entry_point,
            extensions: Vec::new(),
        }
    }

    /// Wrap a C constructor such as `tree_sitter_clickhouse`
    pub fn raw(name: impl Into<String>, construct: RawEntryPoint) -> Self {
        Self::new(name, EntryPoint::Raw(construct))
    }

    /// Wrap a grammar crate's `language()` function
    pub fn binding(name: impl Into<String>, construct: BindingEntryPoint) -> Self {
        Self::new(name, EntryPoint::Binding(construct))
    }

    /// Extensions are stored lowercase, without a leading dot.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions.clear();
        for ext in extensions.iter().map(|ext| normalize_extension(ext)) {
            if !ext.is_empty() && !self.extensions.contains(&ext) {
                self.extensions.push(ext);
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn supports(&self, ext: &str) -> bool {
        let ext = normalize_extension(ext);
        self.extensions.iter().any(|e| *e == ext)
    }

    /// Both artifacts construct the same non-null language tables,
    /// regardless of name or extensions
    pub fn same_language(&self, other: &GrammarArtifact) -> bool {
        match (self.entry_point.construct(), other.entry_point.construct()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    unsafe extern "C" fn tree_sitter_nothing() -> *const TSLanguage {
        ptr::null()
    }

    #[test]
    fn test_extensions_are_normalized() {
        let artifact = GrammarArtifact::raw("clickhouse", tree_sitter_nothing)
            .with_extensions(&[".SQL", "ch", "", "sql"]);

        assert_eq!(artifact.extensions(), &["sql".to_string(), "ch".to_string()]);
        assert!(artifact.supports("SQL"));
        assert!(artifact.supports(".ch"));
        assert!(!artifact.supports("py"));
    }

    #[test]
    fn test_raw_entry_point_may_return_null() {
        let artifact = GrammarArtifact::raw("clickhouse", tree_sitter_nothing);
        assert!(artifact.entry_point().construct().is_none());
    }

    #[test]
    fn test_same_language_compares_constructed_tables() {
        let a = GrammarArtifact::binding("a", tree_sitter_rust::language);
        let b = GrammarArtifact::binding("b", tree_sitter_rust::language);
        let c = GrammarArtifact::binding("c", tree_sitter_go::language);
        let missing = GrammarArtifact::raw("missing", tree_sitter_nothing);

        assert!(a.same_language(&b));
        assert!(!a.same_language(&c));
        assert!(!missing.same_language(&missing));
    }

    #[test]
    fn test_debug_shows_entry_kind() {
        let artifact = GrammarArtifact::raw("clickhouse", tree_sitter_nothing);
        assert_eq!(format!("{:?}", artifact.entry_point()), "Raw");
    }
}

//! Verified language handle
//!
//! Wraps the runtime's `Language` together with the metadata read during
//! verification. Nothing here mutates after construction, so a descriptor
//! can be cloned into any number of threads and parser sessions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Parser};

use crate::errors::{LoadError, Result};
use crate::version::AbiRange;

#[derive(Debug, Clone)]
pub struct LanguageDescriptor {
    name: Arc<str>,
    language: Language,
    abi_version: usize,
    node_kind_count: usize,
    named_node_kind_count: usize,
    field_count: usize,
    parse_state_count: usize,
    root_kind: &'static str,
    root_kind_id: u16,
}

/// Serializable snapshot of a descriptor's metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescriptorSummary {
    pub name: String,
    pub abi_version: usize,
    pub node_kind_count: usize,
    pub named_node_kind_count: usize,
    pub field_count: usize,
    pub parse_state_count: usize,
    pub root_kind: String,
    pub root_kind_id: u16,
}

impl LanguageDescriptor {
    /// Only the loader builds descriptors, after all checks passed.
    pub(crate) fn new(
        name: &str,
        language: Language,
        abi_version: usize,
        root_kind: &'static str,
        root_kind_id: u16,
    ) -> Self {
        let node_kind_count = language.node_kind_count();
        let named_node_kind_count = (0..node_kind_count)
            .filter(|&id| language.node_kind_is_named(id as u16))
            .count();

        Self {
            name: Arc::from(name),
            field_count: language.field_count(),
            parse_state_count: language.parse_state_count(),
            language,
            abi_version,
            node_kind_count,
            named_node_kind_count,
            root_kind,
            root_kind_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime handle, for callers that drive tree-sitter directly
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn abi_version(&self) -> usize {
        self.abi_version
    }

    /// Number of symbols (node kinds), named and anonymous
    pub fn node_kind_count(&self) -> usize {
        self.node_kind_count
    }

    pub fn named_node_kind_count(&self) -> usize {
        self.named_node_kind_count
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn parse_state_count(&self) -> usize {
        self.parse_state_count
    }

    /// Kind of the node the grammar produces for a whole document
    pub fn root_kind(&self) -> &'static str {
        self.root_kind
    }

    pub fn root_kind_id(&self) -> u16 {
        self.root_kind_id
    }

    pub fn kind_name(&self, id: u16) -> Option<&'static str> {
        self.language.node_kind_for_id(id)
    }

    /// Symbol id for a node kind, `None` if the grammar has no such kind
    pub fn kind_id(&self, kind: &str, named: bool) -> Option<u16> {
        match self.language.id_for_node_kind(kind, named) {
            0 => None,
            id => Some(id),
        }
    }

    /// Fresh parser bound to this grammar
    pub fn new_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language).map_err(|_| {
            LoadError::version_mismatch(self.name(), self.abi_version, AbiRange::host())
        })?;
        Ok(parser)
    }

    pub fn summary(&self) -> DescriptorSummary {
        DescriptorSummary {
            name: self.name.to_string(),
            abi_version: self.abi_version,
            node_kind_count: self.node_kind_count,
            named_node_kind_count: self.named_node_kind_count,
            field_count: self.field_count,
            parse_state_count: self.parse_state_count,
            root_kind: self.root_kind.to_string(),
            root_kind_id: self.root_kind_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bundled;
    use crate::loader::load_and_verify;

    fn python() -> super::LanguageDescriptor {
        let artifact = bundled::find("python").unwrap();
        load_and_verify(&artifact).unwrap()
    }

    #[test]
    fn test_kind_lookup_round_trips() {
        let descriptor = python();
        let id = descriptor.kind_id("function_definition", true).unwrap();
        assert_eq!(descriptor.kind_name(id), Some("function_definition"));
        assert_eq!(descriptor.kind_id("no_such_kind_anywhere", true), None);
    }

    #[test]
    fn test_counts_are_consistent() {
        let descriptor = python();
        assert!(descriptor.node_kind_count() > 0);
        assert!(descriptor.named_node_kind_count() <= descriptor.node_kind_count());
        assert!(descriptor.field_count() > 0);
        assert!(descriptor.parse_state_count() > 0);
    }

    #[test]
    fn test_new_parser_parses_source() {
        let descriptor = python();
        let mut parser = descriptor.new_parser().unwrap();
        let tree = parser.parse("def f():\n    return 1\n", None).unwrap();
        let root = tree.root_node();

        assert_eq!(root.kind(), descriptor.root_kind());
        assert!(!root.has_error());
        assert_eq!(root.child(0).unwrap().kind(), "function_definition");
    }

    #[test]
    fn test_clone_shares_the_same_language() {
        let descriptor = python();
        let clone = descriptor.clone();
        assert_eq!(descriptor.summary(), clone.summary());
        assert_eq!(descriptor.language(), clone.language());
    }

    #[test]
    fn test_descriptor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::LanguageDescriptor>();
    }
}

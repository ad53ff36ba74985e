//! Shared fixtures: artifacts that fail in controlled ways.

#![allow(dead_code)]

use std::ptr;

use grammar_loader::GrammarArtifact;
use tree_sitter::ffi::TSLanguage;

/// Stand-in for a generated parse table header. The loader reads only the
/// leading version field before rejecting it; the padding keeps any read
/// inside the allocation.
#[repr(C, align(8))]
pub struct ForeignTables {
    version: u32,
    padding: [u8; 1020],
}

static STALE_TABLES: ForeignTables = ForeignTables {
    version: 1,
    padding: [0; 1020],
};

static FUTURE_TABLES: ForeignTables = ForeignTables {
    version: tree_sitter::LANGUAGE_VERSION as u32 + 1,
    padding: [0; 1020],
};

/// Current ABI, but every count in the header is zero.
#[repr(C, align(8))]
pub struct EmptyTables {
    version: u32,
    symbol_count: u32,
    alias_count: u32,
    token_count: u32,
    padding: [u8; 1008],
}

static EMPTY_TABLES: EmptyTables = EmptyTables {
    version: tree_sitter::LANGUAGE_VERSION as u32,
    symbol_count: 0,
    alias_count: 0,
    token_count: 0,
    padding: [0; 1008],
};

unsafe extern "C" fn tree_sitter_missing() -> *const TSLanguage {
    ptr::null()
}

unsafe extern "C" fn tree_sitter_stale() -> *const TSLanguage {
    &STALE_TABLES as *const ForeignTables as *const TSLanguage
}

unsafe extern "C" fn tree_sitter_future() -> *const TSLanguage {
    &FUTURE_TABLES as *const ForeignTables as *const TSLanguage
}

unsafe extern "C" fn tree_sitter_empty() -> *const TSLanguage {
    &EMPTY_TABLES as *const EmptyTables as *const TSLanguage
}

/// Entry point returning null, as a grammar whose construction failed would
pub fn null_artifact(name: &str) -> GrammarArtifact {
    GrammarArtifact::raw(name, tree_sitter_missing)
}

/// Tables generated for an ABI older than the runtime supports
pub fn stale_artifact(name: &str) -> GrammarArtifact {
    GrammarArtifact::raw(name, tree_sitter_stale)
}

/// Tables generated for an ABI newer than the runtime supports
pub fn future_artifact(name: &str) -> GrammarArtifact {
    GrammarArtifact::raw(name, tree_sitter_future)
}

/// Compatible version tag over tables that declare no symbols
pub fn empty_artifact(name: &str) -> GrammarArtifact {
    GrammarArtifact::raw(name, tree_sitter_empty)
}

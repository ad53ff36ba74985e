//! Grammars linked into this build
//!
//! Python, Java, TypeScript/TSX, Kotlin, Rust, Go

use crate::artifact::GrammarArtifact;

/// Names of the bundled grammars, in catalogue order
pub const NAMES: &[&str] = &["python", "java", "typescript", "tsx", "kotlin", "rust", "go"];

/// All bundled grammar artifacts
pub fn artifacts() -> Vec<GrammarArtifact> {
    vec![
        GrammarArtifact::binding("python", tree_sitter_python::language)
            .with_extensions(&["py", "pyi"]),
        GrammarArtifact::binding("java", tree_sitter_java::language).with_extensions(&["java"]),
        GrammarArtifact::binding("typescript", tree_sitter_typescript::language_typescript)
            .with_extensions(&["ts", "mts", "cts"]),
        GrammarArtifact::binding("tsx", tree_sitter_typescript::language_tsx)
            .with_extensions(&["tsx"]),
        GrammarArtifact::binding("kotlin", tree_sitter_kotlin::language)
            .with_extensions(&["kt", "kts"]),
        GrammarArtifact::binding("rust", tree_sitter_rust::language).with_extensions(&["rs"]),
        GrammarArtifact::binding("go", tree_sitter_go::language).with_extensions(&["go"]),
    ]
}

/// Bundled artifact by grammar name (case-insensitive)
pub fn find(name: &str) -> Option<GrammarArtifact> {
    artifacts()
        .into_iter()
        .find(|artifact| artifact.name().eq_ignore_ascii_case(name))
}

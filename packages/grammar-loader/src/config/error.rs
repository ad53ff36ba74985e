//! Configuration error types

use thiserror::Error;

use crate::errors::AbiRangeError;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Grammar name not linked into this build
    #[error("Unknown grammar '{name}'. {suggestion}")]
    UnknownGrammar { name: String, suggestion: String },

    /// Invalid ABI bounds
    #[error("Invalid ABI configuration: {0}")]
    Abi(#[from] AbiRangeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Unknown grammar error with a closest-name suggestion
    pub fn unknown_grammar(name: impl Into<String>, known: &[&str]) -> Self {
        let name = name.into();
        let suggestion = find_closest_match(&name, known);
        Self::UnknownGrammar { name, suggestion }
    }
}

fn find_closest_match(target: &str, candidates: &[&str]) -> String {
    match candidates
        .iter()
        .min_by_key(|candidate| levenshtein_distance(target, candidate))
    {
        Some(closest) => format!("Did you mean '{}'?", closest),
        None => "No grammars are available".to_string(),
    }
}

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let b: Vec<char> = s2.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, c1) in s1.chars().enumerate() {
        let mut row = vec![i + 1; b.len() + 1];
        for (j, c2) in b.iter().enumerate() {
            let cost = usize::from(c1 != *c2);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        prev = row;
    }

    prev[b.len()]
}

//! YAML schema and loading

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::artifact::GrammarArtifact;
use crate::bundled;
use crate::loader::GrammarLoader;
use crate::version::AbiRange;

/// Configuration schema versions this build reads
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Narrow the accepted ABI versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<AbiBounds>,

    /// Grammars to check; empty means all bundled grammars
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grammars: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbiBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            version: 1,
            abi: None,
            grammars: Vec::new(),
        }
    }
}

impl VerifierConfig {
    /// Parse and validate YAML text
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        if value.get("version").is_none() {
            return Err(ConfigError::MissingVersion);
        }

        let config: Self = serde_yaml::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        self.abi_range()?;

        for name in &self.grammars {
            if bundled::find(name).is_none() {
                return Err(ConfigError::unknown_grammar(name.clone(), bundled::NAMES));
            }
        }

        Ok(())
    }

    /// Effective ABI range: configured bounds inside the runtime range
    pub fn abi_range(&self) -> ConfigResult<AbiRange> {
        let host = AbiRange::host();
        let bounds = self.abi.unwrap_or_default();
        let range = AbiRange::narrowed(
            bounds.min.unwrap_or(host.min()),
            bounds.max.unwrap_or(host.max()),
        )?;
        Ok(range)
    }

    pub fn loader(&self) -> ConfigResult<GrammarLoader> {
        Ok(GrammarLoader::with_abi_range(self.abi_range()?))
    }

    /// Artifacts selected by this configuration, in configured order
    pub fn artifacts(&self) -> ConfigResult<Vec<GrammarArtifact>> {
        if self.grammars.is_empty() {
            return Ok(bundled::artifacts());
        }

        self.grammars
            .iter()
            .map(|name| {
                bundled::find(name)
                    .ok_or_else(|| ConfigError::unknown_grammar(name.clone(), bundled::NAMES))
            })
            .collect()
    }
}

//! Grammar registry
//!
//! Verified descriptors keyed by grammar name, plus an extension index.
//! A name is claimed once and never released: the global registry lives
//! for the whole process and has no teardown. Several registries can
//! coexist; [`GrammarRegistry::global`] is just the shared one.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;

use crate::artifact::{normalize_extension, GrammarArtifact};
use crate::descriptor::LanguageDescriptor;
use crate::errors::{LoadError, RegistryError};
use crate::loader::GrammarLoader;

static GLOBAL: Lazy<GrammarRegistry> = Lazy::new(GrammarRegistry::new);

pub struct GrammarRegistry {
    grammars: DashMap<String, LanguageDescriptor>,
    /// extension -> grammar name
    extensions: DashMap<String, String>,
    /// Serializes writers so a name and its extensions are claimed together
    write_lock: Mutex<()>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self {
            grammars: DashMap::new(),
            extensions: DashMap::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Process-wide registry
    pub fn global() -> &'static GrammarRegistry {
        &GLOBAL
    }

    /// Verify and register with the runtime's ABI range
    pub fn register(
        &self,
        artifact: &GrammarArtifact,
    ) -> Result<LanguageDescriptor, RegistryError> {
        self.register_with(&GrammarLoader::new(), artifact)
    }

    /// Verify `artifact` on first registration; later calls constructing the
    /// same language return the cached descriptor, provided its ABI is
    /// still inside `loader`'s range.
    pub fn register_with(
        &self,
        loader: &GrammarLoader,
        artifact: &GrammarArtifact,
    ) -> Result<LanguageDescriptor, RegistryError> {
        if let Some(descriptor) = self.existing(loader, artifact)? {
            return Ok(descriptor);
        }

        let _guard = self.write_lock.lock();
        // Another writer may have won the race.
        if let Some(descriptor) = self.existing(loader, artifact)? {
            return Ok(descriptor);
        }

        for ext in artifact.extensions() {
            if let Some(owner) = self.extensions.get(ext) {
                return Err(RegistryError::ExtensionCollision {
                    extension: ext.clone(),
                    owner: owner.value().clone(),
                });
            }
        }

        let descriptor = loader.load(artifact)?;

        for ext in artifact.extensions() {
            self.extensions
                .insert(ext.clone(), artifact.name().to_string());
        }
        self.grammars
            .insert(artifact.name().to_string(), descriptor.clone());
        debug!(grammar = artifact.name(), "grammar registered");

        Ok(descriptor)
    }

    fn existing(
        &self,
        loader: &GrammarLoader,
        artifact: &GrammarArtifact,
    ) -> Result<Option<LanguageDescriptor>, RegistryError> {
        let Some(cached) = self.get(artifact.name()) else {
            return Ok(None);
        };

        let same_language = artifact
            .entry_point()
            .construct()
            .is_some_and(|language| language == *cached.language());
        if !same_language {
            return Err(RegistryError::NameCollision {
                name: artifact.name().to_string(),
            });
        }

        let abi = loader.abi_range();
        if !abi.contains(cached.abi_version()) {
            let err = LoadError::version_mismatch(artifact.name(), cached.abi_version(), abi);
            return Err(err.into());
        }

        Ok(Some(cached))
    }

    pub fn get(&self, name: &str) -> Option<LanguageDescriptor> {
        self.grammars.get(name).map(|entry| entry.value().clone())
    }

    /// Lookup by file extension, with or without the leading dot
    pub fn get_by_extension(&self, ext: &str) -> Option<LanguageDescriptor> {
        let name = self
            .extensions
            .get(&normalize_extension(ext))
            .map(|owner| owner.value().clone())?;
        self.get(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.grammars.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.grammars.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Registry and loader
//
// The registry is built once per suite run from a sequence of definition
// sources and is read-only afterwards. A definition source is an explicit
// entry point that declares its descriptors through builder calls -- no
// annotation scanning, no global mutable state. Load failures are fatal to
// suite start: no partial registry survives a bad source.

use crate::config::ProjectConfig;
use crate::descriptor::{Descriptor, PageKey, PageType};
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A location that declares zero or more page object descriptors.
///
/// The loader walks each source's `register` entry point at suite start.
/// Sources are identified by name in load-error diagnostics.
pub trait DefinitionSource: Send + Sync {
    /// Diagnostic name of this source (a path, module name, or label).
    fn name(&self) -> &str;

    /// Declares this source's descriptors through the registrar.
    fn register(&self, registrar: &mut Registrar<'_>) -> Result<()>;
}

/// Adapts a closure into a [`DefinitionSource`].
pub struct FnSource {
    name: String,
    entry: Box<dyn Fn(&mut Registrar<'_>) -> Result<()> + Send + Sync>,
}

impl FnSource {
    pub fn new<F>(name: impl Into<String>, entry: F) -> Self
    where
        F: Fn(&mut Registrar<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            entry: Box::new(entry),
        }
    }
}

impl DefinitionSource for FnSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, registrar: &mut Registrar<'_>) -> Result<()> {
        (self.entry)(registrar)
    }
}

/// Collects one source's descriptor declarations during a load.
///
/// Validates each declaration and applies the project's namespace prefix to
/// the subject before the descriptor is staged.
pub struct Registrar<'a> {
    config: &'a ProjectConfig,
    source: &'a str,
    staged: Vec<Descriptor>,
}

impl<'a> Registrar<'a> {
    fn new(config: &'a ProjectConfig, source: &'a str) -> Self {
        Self {
            config,
            source,
            staged: Vec::new(),
        }
    }

    /// Stages a descriptor declared by this source.
    pub fn register(&mut self, mut descriptor: Descriptor) -> Result<()> {
        self.validate(descriptor.key())?;
        descriptor.qualify_subject(self.config);
        self.staged.push(descriptor);
        Ok(())
    }

    fn validate(&self, key: &PageKey) -> Result<()> {
        let identifier = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid literal regex");
        if !identifier.is_match(key.subject()) {
            return Err(Error::InvalidDescriptor {
                source_name: self.source.to_string(),
                message: format!("malformed subject '{}'", key.subject()),
            });
        }
        if let PageType::Custom(name) = key.page_type() {
            if !identifier.is_match(name) {
                return Err(Error::InvalidDescriptor {
                    source_name: self.source.to_string(),
                    message: format!("malformed page type '{name}'"),
                });
            }
        }
        Ok(())
    }

    fn into_descriptors(self) -> Vec<Descriptor> {
        self.staged
    }
}

/// Table of loaded descriptors, keyed by (page type, subject).
///
/// One registry per suite run; entries are additive during the load and
/// never removed afterwards. Independent runs build independent registries.
pub struct Registry {
    descriptors: HashMap<PageKey, Arc<Descriptor>>,
    origins: HashMap<PageKey, String>,
}

impl Registry {
    /// Builds a registry from the given definition sources.
    ///
    /// Any malformed declaration, failing source, or (page type, subject)
    /// collision fails the whole load. Zero sources is valid and yields an
    /// empty registry (generic fallbacks remain available).
    pub fn load(config: &ProjectConfig, sources: &[Box<dyn DefinitionSource>]) -> Result<Self> {
        let mut descriptors: HashMap<PageKey, Arc<Descriptor>> = HashMap::new();
        let mut origins: HashMap<PageKey, String> = HashMap::new();

        for source in sources {
            let mut registrar = Registrar::new(config, source.name());
            source.register(&mut registrar).map_err(|error| match error {
                error @ (Error::InvalidDescriptor { .. } | Error::DuplicateDescriptor { .. }) => {
                    error
                }
                other => Error::Source {
                    source_name: source.name().to_string(),
                    message: other.to_string(),
                },
            })?;

            let staged = registrar.into_descriptors();
            tracing::debug!(
                source = source.name(),
                count = staged.len(),
                "loaded page object definitions"
            );

            for descriptor in staged {
                let key = descriptor.key().clone();
                if let Some(first) = origins.get(&key) {
                    return Err(Error::DuplicateDescriptor {
                        page: key.to_string(),
                        first: first.clone(),
                        second: source.name().to_string(),
                    });
                }
                origins.insert(key.clone(), source.name().to_string());
                descriptors.insert(key, Arc::new(descriptor));
            }
        }

        tracing::info!(count = descriptors.len(), "page object registry built");
        Ok(Self {
            descriptors,
            origins,
        })
    }

    /// Looks up the descriptor registered for exactly this key.
    pub fn get(&self, key: &PageKey) -> Option<&Arc<Descriptor>> {
        self.descriptors.get(key)
    }

    /// The source a key was declared in, if registered.
    pub fn origin(&self, key: &PageKey) -> Option<&str> {
        self.origins.get(key).map(String::as_str)
    }

    /// Descriptors in a stable order (sorted by key display).
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&PageKey, &Arc<Descriptor>)> {
        let mut entries: Vec<(&PageKey, &Arc<Descriptor>)> = self.descriptors.iter().collect();
        entries.sort_by_key(|(key, _)| key.to_string());
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.iter_sorted().map(|(key, _)| key.to_string()).collect();
        f.debug_struct("Registry").field("keys", &keys).finish()
    }
}

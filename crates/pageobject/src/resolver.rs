// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Resolver - selects a descriptor for a (page type, subject) request and
// instantiates it with the shared capabilities injected.
//
// Precedence is fixed: an exact registry match wins over the generic
// fallback for the page type; load order never matters beyond that rule.

use crate::capabilities::Capabilities;
use crate::config::ProjectConfig;
use crate::descriptor::{Descriptor, PageKey, PageType};
use crate::error::{Error, Result};
use crate::fallback::{default_navigation, GenericFallbacks};
use crate::keyword::{normalize_keyword_name, KeywordArgs, OperationFn};
use crate::location::{self, LocationRule};
use crate::registry::Registry;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Where a [`PageInstance`] came from. Logging only, never ownership: the
/// back-reference to a registered descriptor is weak.
#[derive(Clone)]
pub(crate) enum Origin {
    Specific(Weak<Descriptor>),
    Generic(PageType),
}

impl Origin {
    fn label(&self) -> String {
        match self {
            Origin::Specific(descriptor) => match descriptor.upgrade() {
                Some(descriptor) => format!("registered page object {}", descriptor.key()),
                None => "registered page object (unloaded)".to_string(),
            },
            Origin::Generic(page_type) => format!("generic {page_type} page"),
        }
    }
}

/// An instantiated page object: a descriptor's behavior bound to a subject,
/// with the three shared capabilities injected.
///
/// Instances are ephemeral -- one per resolution, alive until the next
/// successful resolution replaces them. Cloning is cheap (shared maps and
/// capability references) and clones are behaviorally equivalent.
#[derive(Clone)]
pub struct PageInstance {
    pub(crate) key: PageKey,
    pub(crate) config: Arc<ProjectConfig>,
    pub(crate) caps: Capabilities,
    pub(crate) ops: Arc<HashMap<String, OperationFn>>,
    pub(crate) rule: Option<LocationRule>,
    pub(crate) navigation: Option<OperationFn>,
    pub(crate) origin: Origin,
}

impl PageInstance {
    pub fn key(&self) -> &PageKey {
        &self.key
    }

    pub fn page_type(&self) -> &PageType {
        self.key.page_type()
    }

    pub fn subject(&self) -> &str {
        self.key.subject()
    }

    /// The shared capabilities injected at instantiation.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Base URL without a trailing slash, for building navigation URLs.
    pub fn base_url(&self) -> &str {
        self.config.base()
    }

    /// Operation names exposed by this instance, sorted.
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ops.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Whether this instance exposes `name` (normalized before lookup).
    pub fn has_operation(&self, name: &str) -> bool {
        self.ops.contains_key(&normalize_keyword_name(name))
    }

    /// Invokes the named operation with `args` forwarded unmodified.
    pub async fn invoke(&self, name: &str, args: KeywordArgs) -> Result<Value> {
        let normalized = normalize_keyword_name(name);
        let operation = self.ops.get(&normalized).ok_or_else(|| Error::UnknownOperation {
            operation: normalized.clone(),
            page: self.key.to_string(),
        })?;
        tracing::debug!(page = %self.key, operation = %normalized, "dispatching operation");
        operation(self.clone(), args).await
    }

    /// Navigates to this page via the descriptor override or the page
    /// type's builtin URL template.
    pub async fn go_to(&self, args: KeywordArgs) -> Result<()> {
        let navigation = self.navigation.as_ref().ok_or_else(|| Error::NoNavigation {
            page: self.key.to_string(),
        })?;
        navigation(self.clone(), args).await.map(|_| ())
    }

    /// Checks `location` against this page's rule.
    ///
    /// The descriptor override wins when present; otherwise the page type's
    /// builtin pattern applies. A page with neither never matches.
    pub fn matches_location(&self, location: &str) -> bool {
        match &self.rule {
            Some(rule) => rule.matches(self.subject(), location),
            None => {
                tracing::warn!(page = %self.key, "page object has no location rule; treating as mismatch");
                false
            }
        }
    }

    pub(crate) fn origin_label(&self) -> String {
        self.origin.label()
    }
}

impl fmt::Debug for PageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageInstance")
            .field("key", &self.key)
            .field("origin", &self.origin_label())
            .field("operations", &self.operation_names())
            .finish()
    }
}

/// Selects and instantiates descriptors.
pub struct Resolver {
    registry: Arc<Registry>,
    fallbacks: Arc<GenericFallbacks>,
    caps: Capabilities,
    config: Arc<ProjectConfig>,
}

impl Resolver {
    pub fn new(
        registry: Arc<Registry>,
        fallbacks: Arc<GenericFallbacks>,
        caps: Capabilities,
        config: Arc<ProjectConfig>,
    ) -> Self {
        Self {
            registry,
            fallbacks,
            caps,
            config,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves `(page_type, subject)` to an instantiated page object.
    ///
    /// The subject is namespace-qualified the same way the loader qualified
    /// it, so lookups agree with registration. An exact registry match wins;
    /// otherwise the generic fallback for the page type is bound to the
    /// subject. Deterministic: unchanged registry, same arguments,
    /// behaviorally equivalent result.
    pub fn resolve(&self, page_type: &PageType, subject: &str) -> Result<PageInstance> {
        let qualified = self.config.qualify_subject(subject);
        let key = PageKey::new(page_type.clone(), qualified);

        if let Some(descriptor) = self.registry.get(&key) {
            tracing::debug!(page = %key, "resolved specific page object");
            return Ok(self.instantiate(descriptor));
        }

        if let Some(generic) = self.fallbacks.fallback(page_type) {
            tracing::debug!(page = %key, "resolved generic page object");
            return Ok(generic.bind(key.subject(), Arc::clone(&self.config), self.caps.clone()));
        }

        Err(Error::NoPageObject {
            page_type: page_type.to_string(),
            subject: subject.to_string(),
        })
    }

    /// Checks whether the browser's current location matches the resolved
    /// page. Mismatch is `Ok(false)`; only capability failures are errors.
    ///
    /// The location query can block on external latency; no timeout is
    /// applied here.
    pub async fn validate_current(&self, page_type: &PageType, subject: &str) -> Result<bool> {
        let page = self.resolve(page_type, subject)?;
        let location = self.caps.browser.current_location().await?;
        let matched = page.matches_location(&location);
        tracing::debug!(page = %page.key(), location = %location, matched, "validated current location");
        Ok(matched)
    }

    fn instantiate(&self, descriptor: &Arc<Descriptor>) -> PageInstance {
        PageInstance {
            key: descriptor.key().clone(),
            config: Arc::clone(&self.config),
            caps: self.caps.clone(),
            ops: Arc::clone(descriptor.operations()),
            rule: descriptor
                .location()
                .cloned()
                .or_else(|| location::default_rule(descriptor.key().page_type())),
            navigation: descriptor
                .navigation()
                .cloned()
                .or_else(|| default_navigation(descriptor.key().page_type())),
            origin: Origin::Specific(Arc::downgrade(descriptor)),
        }
    }
}

// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// PageObjects - the keyword surface exposed to the test runner
//
// Composes the registry, fallback set, resolver, and active-context
// tracker behind the five core keywords plus dynamic dispatch into the
// active page object. The registry is built in `build()`, so load errors
// surface before any test executes.

use crate::active::ActiveContext;
use crate::capabilities::{Capabilities, LogLevel};
use crate::config::ProjectConfig;
use crate::descriptor::{PageKey, PageType};
use crate::error::{Error, Result};
use crate::fallback::{GenericDescriptor, GenericFallbacks};
use crate::keyword::KeywordArgs;
use crate::registry::{DefinitionSource, Registry};
use crate::resolver::{PageInstance, Resolver};
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Core keywords always exposed, independent of the active page object.
pub const CORE_KEYWORDS: [&str; 5] = [
    "current_page_should_be",
    "get_page_object",
    "go_to_page",
    "load_page_object",
    "log_page_object_keywords",
];

/// The page object engine.
///
/// Built once per suite run via [`PageObjects::builder`]; thereafter the
/// registry is read-only and only the active context changes. Keyword calls
/// are expected to execute one at a time to completion (cooperative,
/// single-threaded); the internal lock exists for soundness, not for
/// concurrent dispatch.
pub struct PageObjects {
    resolver: Resolver,
    caps: Capabilities,
    active: RwLock<ActiveContext>,
}

impl PageObjects {
    /// Starts building an engine for one suite run.
    pub fn builder(config: ProjectConfig, capabilities: Capabilities) -> PageObjectsBuilder {
        PageObjectsBuilder {
            config,
            capabilities,
            sources: Vec::new(),
            generics: Vec::new(),
        }
    }

    /// The loaded registry.
    pub fn registry(&self) -> &Registry {
        self.resolver.registry()
    }

    /// Navigates to the requested page and loads its page object.
    ///
    /// Resolution picks the specific descriptor when one is registered,
    /// else the generic fallback for the page type. Navigation uses the
    /// descriptor's override or the page type's URL template. On failure a
    /// best-effort screenshot is captured before the error propagates.
    pub async fn go_to_page(
        &self,
        page_type: &PageType,
        subject: &str,
        args: KeywordArgs,
    ) -> Result<()> {
        let page = self.resolver.resolve(page_type, subject)?;
        tracing::debug!(page = %page.key(), "navigating to page");
        match page.go_to(args).await {
            Ok(()) => {
                self.active.write().activate(page);
                Ok(())
            }
            Err(error) => {
                self.screenshot_on_failure().await;
                Err(error)
            }
        }
    }

    /// Asserts that the browser is on the requested page, and loads the
    /// page object when it is.
    ///
    /// A mismatch is returned as [`Error::LocationMismatch`] -- an ordinary
    /// failed assertion the host can report and recover from.
    pub async fn current_page_should_be(&self, page_type: &PageType, subject: &str) -> Result<()> {
        let page = self.resolver.resolve(page_type, subject)?;
        let location = self.caps.browser.current_location().await?;
        if page.matches_location(&location) {
            self.active.write().activate(page);
            Ok(())
        } else {
            self.screenshot_on_failure().await;
            Err(Error::LocationMismatch {
                page: page.key().to_string(),
                actual: location,
            })
        }
    }

    /// Checks the current location against the requested page without
    /// loading it. Mismatch is `Ok(false)`.
    pub async fn validate_current(&self, page_type: &PageType, subject: &str) -> Result<bool> {
        self.resolver.validate_current(page_type, subject).await
    }

    /// Resolves the requested page object and makes it the active context.
    pub fn load_page_object(&self, page_type: &PageType, subject: &str) -> Result<PageInstance> {
        let page = self.resolver.resolve(page_type, subject)?;
        self.active.write().activate(page.clone());
        Ok(page)
    }

    /// Resolves the requested page object without loading it.
    ///
    /// Useful for calling a single operation from another keyword without
    /// changing the active context.
    pub fn get_page_object(&self, page_type: &PageType, subject: &str) -> Result<PageInstance> {
        self.resolver.resolve(page_type, subject)
    }

    /// Logs every registered page object and its operations through the
    /// host's log channel, in sorted order.
    pub fn log_page_object_keywords(&self) {
        for (key, descriptor) in self.registry().iter_sorted() {
            let operations = descriptor.operation_names().join(", ");
            self.caps
                .host
                .log(LogLevel::Info, &format!("{key}: {operations}"));
        }
    }

    /// Dispatches an operation on the active page object.
    ///
    /// The name is normalized before lookup; unknown names and dispatch
    /// with no active page are reported as distinct dispatch errors, never
    /// as internal failures.
    pub async fn dispatch(&self, name: &str, args: KeywordArgs) -> Result<Value> {
        // Clone the instance out so no lock is held across the await.
        let page = self.active.read().current().cloned();
        match page {
            Some(page) => page.invoke(name, args).await,
            None => Err(Error::NoActivePage {
                operation: crate::keyword::normalize_keyword_name(name),
            }),
        }
    }

    /// All keyword names currently dispatchable: the core keywords plus the
    /// active page object's operations.
    pub fn keyword_names(&self) -> Vec<String> {
        let mut names: Vec<String> = CORE_KEYWORDS.iter().map(|name| name.to_string()).collect();
        if let Some(page) = self.active.read().current() {
            names.extend(page.operation_names());
        }
        names
    }

    /// Key of the active page object, or `None` in the empty state.
    pub fn current_page(&self) -> Option<PageKey> {
        self.active.read().current().map(|page| page.key().clone())
    }

    /// Discards the active page object, returning to the empty state.
    pub fn reset(&self) {
        self.active.write().reset();
    }

    async fn screenshot_on_failure(&self) {
        match self.caps.browser.capture_screenshot().await {
            Ok(path) => tracing::debug!(path = %path, "captured failure screenshot"),
            Err(error) => {
                tracing::warn!(error = %error, "failed to capture failure screenshot");
            }
        }
    }
}

impl fmt::Debug for PageObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageObjects")
            .field("registry", &self.registry())
            .field("current_page", &self.current_page())
            .finish()
    }
}

/// Builder for [`PageObjects`]. `build()` runs the load step.
pub struct PageObjectsBuilder {
    config: ProjectConfig,
    capabilities: Capabilities,
    sources: Vec<Box<dyn DefinitionSource>>,
    generics: Vec<GenericDescriptor>,
}

impl PageObjectsBuilder {
    /// Adds a definition source to load at build time.
    pub fn source(mut self, source: impl DefinitionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Adds a host-defined generic fallback template.
    pub fn generic(mut self, template: GenericDescriptor) -> Self {
        self.generics.push(template);
        self
    }

    /// Loads the registry and assembles the engine.
    ///
    /// Fails fast on any load error; no engine is produced from a bad
    /// source set.
    pub fn build(self) -> Result<PageObjects> {
        let registry = Arc::new(Registry::load(&self.config, &self.sources)?);

        let mut fallbacks = GenericFallbacks::builtin();
        for template in self.generics {
            fallbacks.register(template);
        }

        let config = Arc::new(self.config);
        let resolver = Resolver::new(
            registry,
            Arc::new(fallbacks),
            self.capabilities.clone(),
            config,
        );

        Ok(PageObjects {
            resolver,
            caps: self.capabilities,
            active: RwLock::new(ActiveContext::new()),
        })
    }
}

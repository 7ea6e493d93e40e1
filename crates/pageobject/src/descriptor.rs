// Capability descriptors - the registered behavior units
//
// A descriptor is a blueprint: a (page type, subject) key plus a map from
// normalized operation name to callable. Descriptors own no capabilities;
// those are injected when the resolver instantiates the descriptor into a
// PageInstance.

use crate::config::ProjectConfig;
use crate::error::{Error, Result};
use crate::keyword::{boxed_operation, normalize_keyword_name, KeywordArgs, OperationFn};
use crate::location::LocationRule;
use crate::resolver::PageInstance;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

/// Archetype of a page.
///
/// `Home`, `Listing`, and `Detail` are the builtin archetypes with generic
/// fallback behavior; anything else is carried as `Custom`. Builtin names
/// parse case-insensitively, custom names are case-sensitive and round-trip
/// as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageType {
    Home,
    Listing,
    Detail,
    Custom(String),
}

impl PageType {
    /// Parses a page type name. Empty names are rejected.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidPageType {
                name: name.to_string(),
            });
        }
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "home" => PageType::Home,
            "listing" => PageType::Listing,
            "detail" => PageType::Detail,
            _ => PageType::Custom(trimmed.to_string()),
        })
    }

    /// The display name of this page type.
    pub fn as_str(&self) -> &str {
        match self {
            PageType::Home => "Home",
            PageType::Listing => "Listing",
            PageType::Detail => "Detail",
            PageType::Custom(name) => name,
        }
    }
}

impl FromStr for PageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a descriptor: the (page type, subject) pair.
///
/// Unique among specific descriptors within one registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    page_type: PageType,
    subject: String,
}

impl PageKey {
    pub fn new(page_type: PageType, subject: impl Into<String>) -> Self {
        Self {
            page_type,
            subject: subject.into(),
        }
    }

    pub fn page_type(&self) -> &PageType {
        &self.page_type
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.page_type, self.subject)
    }
}

/// A registered page object blueprint.
pub struct Descriptor {
    key: PageKey,
    operations: Arc<HashMap<String, OperationFn>>,
    location: Option<LocationRule>,
    navigation: Option<OperationFn>,
}

impl Descriptor {
    /// Starts building a descriptor for the given page type and subject.
    pub fn builder(page_type: PageType, subject: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            key: PageKey::new(page_type, subject),
            operations: HashMap::new(),
            location: None,
            navigation: None,
        }
    }

    pub fn key(&self) -> &PageKey {
        &self.key
    }

    /// Operation names, sorted, as registered (normalized form).
    pub fn operation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn operations(&self) -> &Arc<HashMap<String, OperationFn>> {
        &self.operations
    }

    pub(crate) fn location(&self) -> Option<&LocationRule> {
        self.location.as_ref()
    }

    pub(crate) fn navigation(&self) -> Option<&OperationFn> {
        self.navigation.as_ref()
    }

    /// Applies the project namespace prefix to the subject.
    pub(crate) fn qualify_subject(&mut self, config: &ProjectConfig) {
        let qualified = config.qualify_subject(self.key.subject());
        if qualified != self.key.subject() {
            tracing::debug!(
                page_type = %self.key.page_type(),
                subject = %self.key.subject(),
                qualified = %qualified,
                "applied namespace prefix to page object subject"
            );
            self.key = PageKey::new(self.key.page_type().clone(), qualified);
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("key", &self.key)
            .field("operations", &self.operation_names())
            .field("location", &self.location)
            .field("navigation", &self.navigation.is_some())
            .finish()
    }
}

/// Builder for [`Descriptor`].
pub struct DescriptorBuilder {
    key: PageKey,
    operations: HashMap<String, OperationFn>,
    location: Option<LocationRule>,
    navigation: Option<OperationFn>,
}

impl DescriptorBuilder {
    /// Registers an operation under its normalized name.
    ///
    /// Re-registering a name replaces the earlier handler; names are unique
    /// per descriptor.
    pub fn operation<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(PageInstance, KeywordArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let normalized = normalize_keyword_name(name);
        if self
            .operations
            .insert(normalized.clone(), boxed_operation(handler))
            .is_some()
        {
            tracing::warn!(page = %self.key, operation = %normalized, "operation redefined");
        }
        self
    }

    /// Overrides the location check for this page object.
    ///
    /// Takes precedence over the page type's builtin pattern.
    pub fn location(mut self, rule: LocationRule) -> Self {
        self.location = Some(rule);
        self
    }

    /// Overrides navigation for this page object.
    ///
    /// The handler receives the `go_to_page` arguments and is expected to
    /// drive the browser capability to the right URL itself.
    pub fn navigation<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(PageInstance, KeywordArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.navigation = Some(boxed_operation(handler));
        self
    }

    pub fn build(self) -> Descriptor {
        Descriptor {
            key: self.key,
            operations: Arc::new(self.operations),
            location: self.location,
            navigation: self.navigation,
        }
    }
}

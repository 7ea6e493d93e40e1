// Generic fallback page objects
//
// One template per builtin page type, with the subject bound at resolution
// time rather than registration time. The host environment may register
// templates for further page types; arbitrary unknown types have no
// fallback.

use crate::capabilities::Capabilities;
use crate::config::ProjectConfig;
use crate::descriptor::{PageKey, PageType};
use crate::error::{Error, Result};
use crate::keyword::{boxed_operation, normalize_keyword_name, KeywordArgs, OperationFn};
use crate::location::{self, LocationRule};
use crate::resolver::{Origin, PageInstance};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Builtin navigation for a page type: the category URL template applied to
/// the bound subject. `None` for custom page types, which must supply their
/// own navigation.
pub(crate) fn default_navigation(page_type: &PageType) -> Option<OperationFn> {
    match page_type {
        PageType::Home => Some(boxed_operation(|page: PageInstance, _args: KeywordArgs| async move {
            let url = format!("{}/o/{}/home", page.base_url(), page.subject());
            page.capabilities().browser.go_to(&url).await?;
            Ok(Value::Null)
        })),
        PageType::Listing => Some(boxed_operation(|page: PageInstance, args: KeywordArgs| async move {
            let mut url = format!("{}/o/{}/list", page.base_url(), page.subject());
            if let Some(filter) = args.get_str("filter_name") {
                url.push_str(&format!("?filterName={filter}"));
            }
            page.capabilities().browser.go_to(&url).await?;
            Ok(Value::Null)
        })),
        PageType::Detail => Some(boxed_operation(|page: PageInstance, args: KeywordArgs| async move {
            let record_id = args
                .get_str("record_id")
                .or_else(|| args.arg(0).and_then(Value::as_str))
                .map(str::to_owned)
                .ok_or_else(|| Error::MissingArgument {
                    operation: "go_to_page".to_string(),
                    argument: "record_id".to_string(),
                })?;
            let url = format!(
                "{}/r/{}/{}/view",
                page.base_url(),
                page.subject(),
                record_id
            );
            page.capabilities().browser.go_to(&url).await?;
            Ok(Value::Null)
        })),
        PageType::Custom(_) => None,
    }
}

/// A fallback template for one page type.
///
/// Unlike a registered [`Descriptor`](crate::Descriptor), a generic
/// descriptor is keyed by page type alone; the subject is supplied by the
/// resolver when the template is bound.
pub struct GenericDescriptor {
    page_type: PageType,
    rule: LocationRule,
    operations: Arc<HashMap<String, OperationFn>>,
    navigation: Option<OperationFn>,
}

impl GenericDescriptor {
    /// Creates a template with the page type's builtin navigation (if any).
    pub fn new(page_type: PageType, rule: LocationRule) -> Self {
        let navigation = default_navigation(&page_type);
        Self {
            page_type,
            rule,
            operations: Arc::new(HashMap::new()),
            navigation,
        }
    }

    /// Replaces the template's navigation behavior.
    pub fn with_navigation<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(PageInstance, KeywordArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.navigation = Some(boxed_operation(handler));
        self
    }

    /// Adds an operation every bound instance of this template exposes.
    pub fn with_operation<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(PageInstance, KeywordArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let mut operations: HashMap<String, OperationFn> = (*self.operations).clone();
        operations.insert(normalize_keyword_name(name), boxed_operation(handler));
        self.operations = Arc::new(operations);
        self
    }

    pub fn page_type(&self) -> &PageType {
        &self.page_type
    }

    /// Binds the template to a subject, producing a live instance.
    pub(crate) fn bind(
        &self,
        subject: &str,
        config: Arc<ProjectConfig>,
        caps: Capabilities,
    ) -> PageInstance {
        PageInstance {
            key: PageKey::new(self.page_type.clone(), subject),
            config,
            caps,
            ops: Arc::clone(&self.operations),
            rule: Some(self.rule.clone()),
            navigation: self.navigation.clone(),
            origin: Origin::Generic(self.page_type.clone()),
        }
    }
}

impl fmt::Debug for GenericDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericDescriptor")
            .field("page_type", &self.page_type)
            .field("rule", &self.rule)
            .finish()
    }
}

/// The set of fallback templates, one per page type.
pub struct GenericFallbacks {
    templates: HashMap<PageType, Arc<GenericDescriptor>>,
}

impl GenericFallbacks {
    /// The builtin set: Home, Listing, and Detail templates with their
    /// standard location patterns and navigation.
    pub fn builtin() -> Self {
        let mut fallbacks = Self {
            templates: HashMap::new(),
        };
        for page_type in [PageType::Home, PageType::Listing, PageType::Detail] {
            if let Some(rule) = location::default_rule(&page_type) {
                fallbacks.register(GenericDescriptor::new(page_type, rule));
            }
        }
        fallbacks
    }

    /// Registers a host-defined template, replacing any existing template
    /// for the same page type.
    pub fn register(&mut self, template: GenericDescriptor) {
        self.templates
            .insert(template.page_type().clone(), Arc::new(template));
    }

    /// Returns the template for `page_type`, or `None` when the page type
    /// has no generic default.
    pub fn fallback(&self, page_type: &PageType) -> Option<&Arc<GenericDescriptor>> {
        self.templates.get(page_type)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for GenericFallbacks {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for GenericFallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut page_types: Vec<&str> = self.templates.keys().map(PageType::as_str).collect();
        page_types.sort_unstable();
        f.debug_struct("GenericFallbacks")
            .field("page_types", &page_types)
            .finish()
    }
}

// Keyword names, arguments, and operation callables
//
// The keyword-execution host addresses operations by loosely formatted
// string ("Go To Page", "go_to_page", ...). A single normalization function
// is shared by descriptor registration and dispatch so the two sides can
// never disagree on spelling.

use crate::error::Result;
use crate::resolver::PageInstance;
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Boxed future returned by a page object operation.
pub type KeywordFuture = BoxFuture<'static, Result<Value>>;

/// A dispatchable page object operation.
///
/// Operations receive the instantiated page object (with its injected
/// capabilities) and the host-supplied arguments, forwarded unmodified.
pub type OperationFn = Arc<dyn Fn(PageInstance, KeywordArgs) -> KeywordFuture + Send + Sync>;

/// Normalizes a keyword or operation name: case-fold, whitespace to `_`.
///
/// `"Go To Page"`, `"go to page"`, and `"go_to_page"` all normalize to
/// `"go_to_page"`.
pub fn normalize_keyword_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Wraps an async closure into the type-erased [`OperationFn`] form.
pub(crate) fn boxed_operation<F, Fut>(handler: F) -> OperationFn
where
    F: Fn(PageInstance, KeywordArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |page, args| -> KeywordFuture { Box::pin(handler(page, args)) })
}

/// Arguments passed from the keyword-execution host to an operation.
///
/// The host's argument model is positional values plus named values, both
/// carried as [`serde_json::Value`]. Arguments are forwarded to operations
/// unmodified; typed access is opt-in via [`KeywordArgs::get_as`].
#[derive(Debug, Clone, Default)]
pub struct KeywordArgs {
    positional: Vec<Value>,
    named: HashMap<String, Value>,
}

impl KeywordArgs {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument list from positional values.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: HashMap::new(),
        }
    }

    /// Adds a named argument, builder style.
    pub fn with<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.named.insert(name.to_string(), value.into());
        self
    }

    /// Appends a positional argument.
    pub fn push<V: Into<Value>>(&mut self, value: V) {
        self.positional.push(value.into());
    }

    /// Returns the positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Returns the named argument `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Returns the named argument `name` as a string slice, if present and
    /// a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Deserializes the named argument `name` into `T`.
    ///
    /// Returns `Ok(None)` when the argument is absent and an error when it
    /// is present but cannot be converted.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.get(name)
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// True when there are no positional and no named arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// The named arguments.
    pub fn named(&self) -> &HashMap<String, Value> {
        &self.named
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_spaces_and_case() {
        assert_eq!(normalize_keyword_name("Go To Page"), "go_to_page");
        assert_eq!(normalize_keyword_name("go to page"), "go_to_page");
        assert_eq!(normalize_keyword_name("GO TO PAGE"), "go_to_page");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        assert_eq!(normalize_keyword_name("go_to_page"), "go_to_page");
        assert_eq!(
            normalize_keyword_name(&normalize_keyword_name("Open Filter")),
            "open_filter"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_keyword_name("  Open   Filter \t"), "open_filter");
    }

    #[test]
    fn test_args_positional_and_named() {
        let args = KeywordArgs::positional(["Island"]).with("filter_name", "Recent");
        assert_eq!(args.arg(0), Some(&json!("Island")));
        assert_eq!(args.arg(1), None);
        assert_eq!(args.get_str("filter_name"), Some("Recent"));
        assert_eq!(args.get("missing"), None);
        assert_eq!(args.len(), 1);
        assert!(!args.is_empty());
    }

    #[test]
    fn test_args_typed_getter() {
        let args = KeywordArgs::new().with("count", 3);
        let count: Option<u32> = args.get_as("count").unwrap();
        assert_eq!(count, Some(3));
        let absent: Option<u32> = args.get_as("missing").unwrap();
        assert_eq!(absent, None);
        assert!(args.get_as::<bool>("count").is_err());
    }
}

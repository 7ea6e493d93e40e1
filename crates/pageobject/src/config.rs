// Project configuration consumed by the loader and the generic pages

use serde::{Deserialize, Serialize};

/// Per-project settings the engine needs: the base URL navigation templates
/// are built from, and the optional managed-package namespace prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Base URL of the application under test, e.g.
    /// `https://example.lightning.force.com/lightning`. A trailing slash is
    /// tolerated.
    pub base_url: String,

    /// Namespace prefix, including the trailing `__`, or `None` when the
    /// project is unmanaged.
    #[serde(default)]
    pub namespace_prefix: Option<String>,
}

impl ProjectConfig {
    /// Creates a config with no namespace prefix.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            namespace_prefix: None,
        }
    }

    /// Sets the namespace prefix, appending the trailing `__` if missing.
    /// An empty prefix means "no namespace".
    pub fn with_namespace(mut self, prefix: impl Into<String>) -> Self {
        let mut prefix: String = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with("__") {
            prefix.push_str("__");
        }
        self.namespace_prefix = if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        };
        self
    }

    /// Applies the namespace prefix to an unqualified custom-object subject.
    ///
    /// A subject is prefixable only when it splits on `__` into exactly a
    /// name plus a trailing `c` (`Foo__c`). Already-qualified names
    /// (`ns__Foo__c`) and plain names (`Contact`) pass through unchanged.
    pub(crate) fn qualify_subject(&self, subject: &str) -> String {
        if let Some(prefix) = &self.namespace_prefix {
            let parts: Vec<&str> = subject.split("__").collect();
            if parts.len() == 2 && parts[1] == "c" {
                return format!("{prefix}{subject}");
            }
        }
        subject.to_string()
    }

    /// Base URL without a trailing slash.
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_custom_object() {
        let config = ProjectConfig::new("https://example.test").with_namespace("foobar");
        assert_eq!(config.qualify_subject("Foo__c"), "foobar__Foo__c");
    }

    #[test]
    fn test_qualify_skips_already_qualified() {
        let config = ProjectConfig::new("https://example.test").with_namespace("foobar__");
        assert_eq!(config.qualify_subject("foobar__Foo__c"), "foobar__Foo__c");
    }

    #[test]
    fn test_qualify_skips_standard_object() {
        let config = ProjectConfig::new("https://example.test").with_namespace("foobar");
        assert_eq!(config.qualify_subject("Contact"), "Contact");
    }

    #[test]
    fn test_qualify_without_namespace() {
        let config = ProjectConfig::new("https://example.test");
        assert_eq!(config.qualify_subject("Foo__c"), "Foo__c");
    }

    #[test]
    fn test_empty_namespace_means_none() {
        let config = ProjectConfig::new("https://example.test").with_namespace("");
        assert_eq!(config.namespace_prefix, None);
    }

    #[test]
    fn test_base_strips_trailing_slash() {
        let config = ProjectConfig::new("https://example.test/lightning/");
        assert_eq!(config.base(), "https://example.test/lightning");
    }
}

// Error types for pageobject-rs

use thiserror::Error;

/// Result type alias for pageobject-rs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when resolving and dispatching page objects
///
/// Load-class errors (`Source`, `InvalidDescriptor`, `DuplicateDescriptor`)
/// are raised by [`Registry::load`](crate::Registry::load) before any test
/// executes and are fatal to suite start. Everything else is local to a
/// single keyword invocation and is reported through the host's normal
/// failure-reporting channel.
#[derive(Debug, Error)]
pub enum Error {
    /// A definition source failed while declaring its page objects
    #[error("unable to load page object source '{source_name}': {message}")]
    Source {
        source_name: String,
        message: String,
    },

    /// A descriptor was declared with a malformed category or subject
    #[error("invalid page object declaration in '{source_name}': {message}")]
    InvalidDescriptor {
        source_name: String,
        message: String,
    },

    /// Two sources declared the same (page type, subject) pair
    #[error(
        "duplicate page object for {page}: declared in both '{first}' and '{second}'"
    )]
    DuplicateDescriptor {
        page: String,
        first: String,
        second: String,
    },

    /// A page type name was empty or otherwise unusable
    #[error("invalid page type '{name}': must be a non-empty name")]
    InvalidPageType { name: String },

    /// No specific or generic descriptor exists for the requested pair
    #[error("no page object for {page_type}/{subject}")]
    NoPageObject { page_type: String, subject: String },

    /// The browser's current location does not match the expected pattern
    ///
    /// Raised only by the assertion-style keyword
    /// (`current_page_should_be`); [`Resolver::validate_current`]
    /// (crate::Resolver::validate_current) reports a mismatch as
    /// `Ok(false)` instead.
    #[error("expected to be on {page}, but the current location is '{actual}'")]
    LocationMismatch { page: String, actual: String },

    /// The requested operation is not present on the active page object
    #[error("unknown operation '{operation}' on {page}")]
    UnknownOperation { operation: String, page: String },

    /// An operation was dispatched with no page object loaded
    #[error(
        "no active page object; load one with `load_page_object` before calling '{operation}'"
    )]
    NoActivePage { operation: String },

    /// The page object defines no way to navigate to its page
    #[error("page object {page} does not define navigation for its page type")]
    NoNavigation { page: String },

    /// A required keyword argument was not supplied
    #[error("operation '{operation}' requires the argument '{argument}'")]
    MissingArgument { operation: String, argument: String },

    /// Browser-automation capability failure
    #[error("browser error: {0}")]
    Browser(String),

    /// Keyword-execution host failure
    #[error("keyword host error: {0}")]
    Host(String),

    /// Domain-API capability failure
    #[error("domain API error: {0}")]
    Api(String),

    /// JSON conversion error for keyword argument values
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

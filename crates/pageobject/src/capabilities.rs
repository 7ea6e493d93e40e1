// Capability boundaries consumed by the engine
//
// The engine never owns a browser, a keyword host, or an API client. The
// embedding test runner supplies one implementation of each, and every
// instantiated page object receives the same three references at
// construction time. No ambient or global lookup.

use crate::error::Result;
use crate::keyword::KeywordArgs;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Log levels for the host's reporting channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        };
        f.write_str(label)
    }
}

/// Access to the keyword-execution host.
///
/// Operations may call back into other registered keywords by name, and may
/// write to the host's log (the channel the test report is built from).
#[async_trait]
pub trait KeywordHost: Send + Sync {
    /// Runs a host keyword by name with the given arguments.
    async fn run_keyword(&self, name: &str, args: KeywordArgs) -> Result<Value>;

    /// Writes a message to the host's log.
    fn log(&self, level: LogLevel, message: &str);
}

/// Access to the browser-automation capability.
///
/// Location queries may involve unbounded external latency; calls are
/// awaited with no internal timeout. Any timeout or retry policy belongs to
/// the implementation behind this trait, not to the engine.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Returns the browser's current location (a URL-like identifier).
    async fn current_location(&self) -> Result<String>;

    /// Navigates the browser to `url`.
    async fn go_to(&self, url: &str) -> Result<()>;

    /// Clicks the element addressed by `locator`.
    async fn click(&self, locator: &str) -> Result<()>;

    /// Types `text` into the element addressed by `locator`.
    async fn input_text(&self, locator: &str, text: &str) -> Result<()>;

    /// Returns the visible text of the element addressed by `locator`.
    async fn get_text(&self, locator: &str) -> Result<String>;

    /// Captures a screenshot for failure diagnostics, returning its path.
    async fn capture_screenshot(&self) -> Result<String>;
}

/// Access to the record-oriented domain API.
///
/// Opaque to resolution; only descriptor operations use it.
#[async_trait]
pub trait DomainApi: Send + Sync {
    /// Creates a record and returns its id.
    async fn create_record(&self, object_type: &str, fields: Value) -> Result<String>;

    /// Fetches a record by id.
    async fn get_record(&self, object_type: &str, id: &str) -> Result<Value>;

    /// Updates fields on an existing record.
    async fn update_record(&self, object_type: &str, id: &str, fields: Value) -> Result<()>;

    /// Deletes a record by id.
    async fn delete_record(&self, object_type: &str, id: &str) -> Result<()>;

    /// Runs a domain query and returns the matching records.
    async fn query(&self, query: &str) -> Result<Vec<Value>>;
}

/// The three shared facilities injected into every page object instance.
///
/// Cheap to clone; all fields are shared references. Page objects must not
/// hold external resources of their own -- resource ownership lives behind
/// these capabilities.
#[derive(Clone)]
pub struct Capabilities {
    pub host: Arc<dyn KeywordHost>,
    pub browser: Arc<dyn BrowserDriver>,
    pub api: Arc<dyn DomainApi>,
}

impl Capabilities {
    pub fn new(
        host: Arc<dyn KeywordHost>,
        browser: Arc<dyn BrowserDriver>,
        api: Arc<dyn DomainApi>,
    ) -> Self {
        Self { host, browser, api }
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

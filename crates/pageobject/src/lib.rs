//! pageobject: Page object resolution and keyword dispatch for
//! keyword-driven browser tests
//!
//! This crate lets a test author declare reusable, context-specific
//! automation behaviors ("page objects") that are loaded on demand and
//! exposed as callable test steps, instead of registering every behavior as
//! a global keyword. The embedding test runner supplies three capabilities
//! (keyword host, browser driver, domain API); the engine handles
//! registration, resolution, and dispatch.
//!
//! # Examples
//!
//! ## Declaring and resolving a page object
//!
//! ```ignore
//! use pageobject_rs::{
//!     Capabilities, Descriptor, FnSource, KeywordArgs, PageObjects, PageType,
//!     ProjectConfig,
//! };
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProjectConfig::new("https://example.lightning.force.com/lightning");
//!     let capabilities = Capabilities::new(host, browser, api);
//!
//!     let engine = PageObjects::builder(config, capabilities)
//!         .source(FnSource::new("islands.rs", |registrar| {
//!             registrar.register(
//!                 Descriptor::builder(PageType::Listing, "Island")
//!                     .operation("Open Recent Filter", |page, _args| async move {
//!                         let url = format!(
//!                             "{}/o/{}/list?filterName=Recent",
//!                             page.base_url(),
//!                             page.subject()
//!                         );
//!                         page.capabilities().browser.go_to(&url).await?;
//!                         Ok(json!(null))
//!                     })
//!                     .build(),
//!             )
//!         }))
//!         .build()?;
//!
//!     // The specific descriptor wins for (Listing, Island)...
//!     engine.go_to_page(&PageType::Listing, "Island", KeywordArgs::new()).await?;
//!     engine.dispatch("Open Recent Filter", KeywordArgs::new()).await?;
//!
//!     // ...while (Home, Island) falls back to the generic Home page.
//!     engine.current_page_should_be(&PageType::Home, "Island").await?;
//!
//!     Ok(())
//! }
//! ```

mod active;
mod capabilities;
mod config;
mod descriptor;
mod engine;
mod error;
mod fallback;
mod keyword;
pub mod location;
mod registry;
mod resolver;

// Re-export error types
pub use error::{Error, Result};

// Re-export the engine facade and its keyword surface
pub use engine::{PageObjects, PageObjectsBuilder, CORE_KEYWORDS};

// Re-export descriptor types
pub use descriptor::{Descriptor, DescriptorBuilder, PageKey, PageType};

// Re-export registry and loading types
pub use registry::{DefinitionSource, FnSource, Registrar, Registry};

// Re-export the generic fallback set
pub use fallback::{GenericDescriptor, GenericFallbacks};

// Re-export resolution types
pub use resolver::{PageInstance, Resolver};

// Re-export the active-context tracker
pub use active::ActiveContext;

// Re-export capability boundaries
pub use capabilities::{BrowserDriver, Capabilities, DomainApi, KeywordHost, LogLevel};

// Re-export keyword plumbing
pub use keyword::{normalize_keyword_name, KeywordArgs, KeywordFuture, OperationFn};

// Re-export location matching
pub use location::{LocationRule, Segment};

// Re-export project configuration
pub use config::ProjectConfig;

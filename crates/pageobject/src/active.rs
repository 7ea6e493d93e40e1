// Active-context tracker
//
// States are {Empty, Active(page)}. The only transition is `activate`,
// which replaces the previous instance wholesale; the replaced instance is
// simply dropped. Page objects must not hold external resources needing
// cleanup -- that responsibility belongs to the injected capabilities.

use crate::error::{Error, Result};
use crate::keyword::{normalize_keyword_name, KeywordArgs};
use crate::resolver::PageInstance;
use serde_json::Value;

/// Holds the currently loaded page object, if any, and dispatches
/// operations into it.
#[derive(Debug, Default)]
pub struct ActiveContext {
    current: Option<PageInstance>,
}

impl ActiveContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `page` the active page object, superseding any previous one.
    pub fn activate(&mut self, page: PageInstance) {
        tracing::debug!(
            page = %page.key(),
            origin = %page.origin_label(),
            "activating page object"
        );
        self.current = Some(page);
    }

    /// The active page object, or `None` in the empty state.
    pub fn current(&self) -> Option<&PageInstance> {
        self.current.as_ref()
    }

    /// Returns to the empty state. Not required by the state machine, but
    /// lets a host tear down deterministically at suite end.
    pub fn reset(&mut self) {
        if let Some(page) = self.current.take() {
            tracing::debug!(page = %page.key(), "discarding active page object");
        }
    }

    /// Dispatches `name` on the active page object, forwarding `args`
    /// unmodified. A failed dispatch leaves the context unchanged.
    pub async fn dispatch(&self, name: &str, args: KeywordArgs) -> Result<Value> {
        match &self.current {
            Some(page) => page.invoke(name, args).await,
            None => Err(Error::NoActivePage {
                operation: normalize_keyword_name(name),
            }),
        }
    }
}

// Basic example - Declare a page object, resolve it, dispatch operations
//
// Shows: definition sources, specific-vs-generic resolution, location
// validation, and keyword dispatch. Capability implementations here are
// in-memory stand-ins; a real host wires its own driver and API client.

use async_trait::async_trait;
use pageobject_rs::{
    BrowserDriver, Capabilities, Descriptor, DomainApi, FnSource, KeywordArgs, KeywordHost,
    LogLevel, PageObjects, PageType, ProjectConfig, Result,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;

struct ConsoleHost;

#[async_trait]
impl KeywordHost for ConsoleHost {
    async fn run_keyword(&self, name: &str, _args: KeywordArgs) -> Result<Value> {
        println!("host keyword: {name}");
        Ok(Value::Null)
    }

    fn log(&self, level: LogLevel, message: &str) {
        println!("[{level}] {message}");
    }
}

struct FakeBrowser {
    location: Mutex<String>,
}

#[async_trait]
impl BrowserDriver for FakeBrowser {
    async fn current_location(&self) -> Result<String> {
        Ok(self.location.lock().clone())
    }

    async fn go_to(&self, url: &str) -> Result<()> {
        println!("navigate: {url}");
        *self.location.lock() = url.to_string();
        Ok(())
    }

    async fn click(&self, locator: &str) -> Result<()> {
        println!("click: {locator}");
        Ok(())
    }

    async fn input_text(&self, _locator: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn get_text(&self, _locator: &str) -> Result<String> {
        Ok(String::new())
    }

    async fn capture_screenshot(&self) -> Result<String> {
        Ok("screenshot.png".to_string())
    }
}

struct NoopApi;

#[async_trait]
impl DomainApi for NoopApi {
    async fn create_record(&self, _object_type: &str, _fields: Value) -> Result<String> {
        Ok("rec-001".to_string())
    }

    async fn get_record(&self, _object_type: &str, _id: &str) -> Result<Value> {
        Ok(json!({}))
    }

    async fn update_record(&self, _object_type: &str, _id: &str, _fields: Value) -> Result<()> {
        Ok(())
    }

    async fn delete_record(&self, _object_type: &str, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _query: &str) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let capabilities = Capabilities::new(
        Arc::new(ConsoleHost),
        Arc::new(FakeBrowser {
            location: Mutex::new("about:blank".to_string()),
        }),
        Arc::new(NoopApi),
    );

    let engine = PageObjects::builder(
        ProjectConfig::new("https://example.lightning.force.com/lightning"),
        capabilities,
    )
    .source(FnSource::new("island_pages", |registrar| {
        registrar.register(
            Descriptor::builder(PageType::Listing, "Island")
                .operation("Open Recent Filter", |page, _args| async move {
                    let url = format!(
                        "{}/o/{}/list?filterName=Recent",
                        page.base_url(),
                        page.subject()
                    );
                    page.capabilities().browser.go_to(&url).await?;
                    Ok(json!(null))
                })
                .build(),
        )
    }))
    .build()?;

    engine.log_page_object_keywords();

    // Specific descriptor wins for (Listing, Island)
    engine
        .go_to_page(&PageType::Listing, "Island", KeywordArgs::new())
        .await?;
    engine
        .dispatch("Open Recent Filter", KeywordArgs::new())
        .await?;

    // No Home descriptor registered: the generic Home page is bound
    engine
        .go_to_page(&PageType::Home, "Island", KeywordArgs::new())
        .await?;
    engine
        .current_page_should_be(&PageType::Home, "Island")
        .await?;

    println!("current page: {:?}", engine.current_page());
    Ok(())
}

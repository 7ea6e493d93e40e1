// Load-time behavior through the public builder: collisions, namespace
// qualification, and host-defined generic fallbacks.


use mock_capabilities::capabilities;
use pageobject_rs::{
    Descriptor, Error, FnSource, GenericDescriptor, KeywordArgs, LocationRule, PageObjects,
    PageType, ProjectConfig, Segment,
};
use serde_json::json;

const BASE: &str = "https://example.test/app";

fn detail_source(name: &'static str) -> FnSource {
    FnSource::new(name, |registrar| {
        registrar.register(Descriptor::builder(PageType::Detail, "Foo__c").build())
    })
}

#[tokio::test]
async fn test_collision_across_sources_fails_build() {
    let (caps, _browser, _host, _api) = capabilities();
    let error = PageObjects::builder(ProjectConfig::new(BASE), caps)
        .source(detail_source("first.rs"))
        .source(detail_source("second.rs"))
        .build()
        .unwrap_err();

    match error {
        Error::DuplicateDescriptor { first, second, .. } => {
            assert_eq!(first, "first.rs");
            assert_eq!(second, "second.rs");
        }
        other => panic!("expected DuplicateDescriptor, got {other:?}"),
    }
}

#[tokio::test]
async fn test_namespace_qualification_end_to_end() {
    // The loader qualifies the declared subject, and the resolver applies
    // the same qualification at lookup, so the unqualified name still
    // resolves to the specific descriptor.
    let (caps, _browser, _host, _api) = capabilities();
    let engine = PageObjects::builder(
        ProjectConfig::new(BASE).with_namespace("ns"),
        caps,
    )
    .source(detail_source("managed.rs"))
    .build()
    .unwrap();

    let page = engine.get_page_object(&PageType::Detail, "Foo__c").unwrap();
    assert_eq!(page.key().to_string(), "Detail/ns__Foo__c");
    assert_eq!(page.subject(), "ns__Foo__c");

    // Standard objects are left alone.
    let contact = engine.get_page_object(&PageType::Detail, "Contact").unwrap();
    assert_eq!(contact.subject(), "Contact");
}

#[tokio::test]
async fn test_host_defined_generic_fallback() {
    let (caps, browser, _host, _api) = capabilities();
    let setup = PageType::Custom("Setup".to_string());
    let engine = PageObjects::builder(ProjectConfig::new(BASE), caps)
        .generic(
            GenericDescriptor::new(
                setup.clone(),
                LocationRule::suffix(vec![
                    Segment::literal("setup"),
                    Segment::Subject,
                    Segment::literal("home"),
                ]),
            )
            .with_navigation(|page, _args| async move {
                let url = format!("{}/setup/{}/home", page.base_url(), page.subject());
                page.capabilities().browser.go_to(&url).await?;
                Ok(json!(null))
            })
            .with_operation("Open Panel", |page, _args| async move {
                page.capabilities().browser.click("button.panel").await?;
                Ok(json!(null))
            }),
        )
        .build()
        .unwrap();

    engine
        .go_to_page(&setup, "ObjectManager", KeywordArgs::new())
        .await
        .unwrap();
    assert_eq!(
        browser.last_visited().unwrap(),
        format!("{BASE}/setup/ObjectManager/home")
    );
    assert!(engine
        .validate_current(&setup, "ObjectManager")
        .await
        .unwrap());

    engine.dispatch("Open Panel", KeywordArgs::new()).await.unwrap();
}

#[tokio::test]
async fn test_custom_page_type_without_navigation_fails() {
    let (caps, browser, _host, _api) = capabilities();
    let engine = PageObjects::builder(ProjectConfig::new(BASE), caps)
        .source(FnSource::new("consoles.rs", |registrar| {
            registrar.register(
                Descriptor::builder(PageType::Custom("Console".to_string()), "Support").build(),
            )
        }))
        .build()
        .unwrap();

    let error = engine
        .go_to_page(
            &PageType::Custom("Console".to_string()),
            "Support",
            KeywordArgs::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(error, Error::NoNavigation { .. }));
    assert_eq!(browser.screenshot_count(), 1);
}

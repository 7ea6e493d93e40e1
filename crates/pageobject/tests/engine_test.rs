// End-to-end engine tests: load definitions, resolve specific vs generic,
// validate locations, and navigate.


use mock_capabilities::{capabilities, MockBrowser, MockHost};
use pageobject_rs::{
    Descriptor, Error, FnSource, KeywordArgs, PageObjects, PageType, ProjectConfig, CORE_KEYWORDS,
};
use serde_json::json;
use std::sync::Arc;

const BASE: &str = "https://example.lightning.force.com/lightning";

fn island_source() -> FnSource {
    FnSource::new("island_pages.rs", |registrar| {
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
                .operation("Echo Args", |_page, args| async move {
                    Ok(json!({
                        "first": args.arg(0).cloned(),
                        "named": args.get("name").cloned(),
                    }))
                })
                .build(),
        )
    })
}

fn engine() -> (PageObjects, Arc<MockBrowser>, Arc<MockHost>) {
    let (caps, browser, host, _api) = capabilities();
    let engine = PageObjects::builder(ProjectConfig::new(BASE), caps)
        .source(island_source())
        .build()
        .expect("load should succeed");
    (engine, browser, host)
}

#[tokio::test]
async fn test_generic_fallback_bound_at_resolution() {
    // No Home descriptor is registered for Island, so resolution falls back
    // to the generic Home page with the subject bound.
    let (engine, browser, _host) = engine();

    let page = engine
        .get_page_object(&PageType::Home, "Island")
        .expect("generic fallback should resolve");
    assert_eq!(page.key().to_string(), "Home/Island");

    browser.set_location(&format!("{BASE}/o/Island/home"));
    assert!(engine
        .validate_current(&PageType::Home, "Island")
        .await
        .unwrap());
    assert!(!engine
        .validate_current(&PageType::Listing, "Island")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_specific_descriptor_wins_over_generic() {
    let (engine, browser, _host) = engine();

    engine
        .go_to_page(&PageType::Listing, "Island", KeywordArgs::new())
        .await
        .unwrap();

    assert_eq!(engine.current_page().unwrap().to_string(), "Listing/Island");
    assert_eq!(browser.last_visited().unwrap(), format!("{BASE}/o/Island/list"));

    // The specific page object's operations are now dispatchable; a generic
    // listing page would expose none.
    let names = engine.keyword_names();
    assert!(names.contains(&"open_recent_filter".to_string()));
    assert!(names.contains(&"echo_args".to_string()));
}

#[tokio::test]
async fn test_generic_listing_navigation_honors_filter() {
    let (engine, browser, _host) = engine();

    engine
        .go_to_page(
            &PageType::Listing,
            "Contact",
            KeywordArgs::new().with("filter_name", "Recent"),
        )
        .await
        .unwrap();

    assert_eq!(
        browser.last_visited().unwrap(),
        format!("{BASE}/o/Contact/list?filterName=Recent")
    );
    assert_eq!(engine.current_page().unwrap().to_string(), "Listing/Contact");
}

#[tokio::test]
async fn test_generic_detail_navigation_requires_record_id() {
    let (engine, browser, _host) = engine();

    let error = engine
        .go_to_page(&PageType::Detail, "Contact", KeywordArgs::new())
        .await
        .unwrap_err();
    assert!(matches!(error, Error::MissingArgument { .. }));
    assert_eq!(browser.screenshot_count(), 1);

    engine
        .go_to_page(
            &PageType::Detail,
            "Contact",
            KeywordArgs::new().with("record_id", "003000000000001"),
        )
        .await
        .unwrap();
    assert_eq!(
        browser.last_visited().unwrap(),
        format!("{BASE}/r/Contact/003000000000001/view")
    );
}

#[tokio::test]
async fn test_current_page_should_be_match_loads_page() {
    let (engine, browser, _host) = engine();

    browser.set_location(&format!("{BASE}/o/Island/list"));
    engine
        .current_page_should_be(&PageType::Listing, "Island")
        .await
        .unwrap();
    assert_eq!(engine.current_page().unwrap().to_string(), "Listing/Island");
}

#[tokio::test]
async fn test_current_page_should_be_mismatch() {
    let (engine, browser, _host) = engine();

    browser.set_location(&format!("{BASE}/o/Account/list"));
    let error = engine
        .current_page_should_be(&PageType::Listing, "Island")
        .await
        .unwrap_err();

    match error {
        Error::LocationMismatch { page, actual } => {
            assert_eq!(page, "Listing/Island");
            assert!(actual.ends_with("/o/Account/list"));
        }
        other => panic!("expected LocationMismatch, got {other:?}"),
    }
    // A failure screenshot was captured and the context stayed empty.
    assert_eq!(browser.screenshot_count(), 1);
    assert!(engine.current_page().is_none());
}

#[tokio::test]
async fn test_resolution_error_for_unknown_pair() {
    let (engine, _browser, _host) = engine();

    let error = engine
        .get_page_object(&PageType::Custom("Wizard".to_string()), "Island")
        .unwrap_err();
    match error {
        Error::NoPageObject { .. } => {
            assert_eq!(error.to_string(), "no page object for Wizard/Island");
        }
        other => panic!("expected NoPageObject, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let (engine, _browser, _host) = engine();

    let first = engine.get_page_object(&PageType::Listing, "Island").unwrap();
    let second = engine.get_page_object(&PageType::Listing, "Island").unwrap();
    assert_eq!(first.key(), second.key());
    assert_eq!(first.operation_names(), second.operation_names());
}

#[tokio::test]
async fn test_keyword_names_core_only_when_empty() {
    let (engine, _browser, _host) = engine();
    assert_eq!(engine.keyword_names(), CORE_KEYWORDS.to_vec());
}

#[tokio::test]
async fn test_log_page_object_keywords() {
    let (engine, _browser, host) = engine();

    engine.log_page_object_keywords();
    let lines = host.log_lines();
    assert_eq!(lines, vec!["Listing/Island: echo_args, open_recent_filter"]);
}

#[tokio::test]
async fn test_reset_returns_to_empty_state() {
    let (engine, browser, _host) = engine();

    browser.set_location(&format!("{BASE}/o/Island/list"));
    engine.load_page_object(&PageType::Listing, "Island").unwrap();
    assert!(engine.current_page().is_some());

    engine.reset();
    assert!(engine.current_page().is_none());
    assert_eq!(engine.keyword_names(), CORE_KEYWORDS.to_vec());
}

#[tokio::test]
async fn test_independent_engines_do_not_share_state() {
    // Two suite runs in one process build their own registries.
    let (first, _b1, _h1) = engine();

    let (caps, _b2, _h2, _a2) = capabilities();
    let second = PageObjects::builder(ProjectConfig::new(BASE), caps)
        .build()
        .unwrap();

    assert_eq!(first.registry().len(), 1);
    assert!(second.registry().is_empty());

    first.load_page_object(&PageType::Listing, "Island").unwrap();
    assert!(second.current_page().is_none());
}

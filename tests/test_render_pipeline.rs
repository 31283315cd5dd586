//! End-to-end render operation against a local document origin.

mod common;

use std::time::Duration;

use common::{Document, FakeOrigin};
use showcase::config::SiteContent;
use showcase::error::{FetchError, Resource, ShowcaseError};
use showcase::fetch::HttpDataSource;
use showcase::page::{render_document, render_page};

fn content() -> SiteContent {
    SiteContent::default()
}

#[tokio::test]
async fn two_projects_render_two_cards() {
    let origin = FakeOrigin::with_portfolio(
        "X",
        r#"{"ProjA": "https://a", "ProjB": "https://b"}"#,
    )
    .await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let page = render_page(&source, &content()).await.unwrap();

    assert_eq!(page.profile.name, "X");
    assert_eq!(page.projects.cards.len(), 2);
    assert_eq!(page.projects.cards[0].title, "ProjA");
    assert_eq!(page.projects.cards[0].href, "https://a");
    assert_eq!(page.projects.cards[1].title, "ProjB");
    assert_eq!(page.projects.cards[1].href, "https://b");
}

#[tokio::test]
async fn empty_portfolio_renders_no_cards() {
    let origin = FakeOrigin::with_portfolio("X", "{}").await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let html = render_document(&source, &content()).await.unwrap();

    assert!(html.contains("<h1>X</h1>"));
    assert!(html.contains("<h2>Projects</h2>"));
    assert!(!html.contains("<article"));
}

#[tokio::test]
async fn general_info_404_fails_the_render() {
    let origin = FakeOrigin::start(Document::status(404), Document::ok(r#"{"K": "V"}"#)).await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let err = render_document(&source, &content()).await.unwrap_err();

    let ShowcaseError::Fetch(fetch) = err else {
        panic!("expected fetch error, got {err:?}");
    };
    assert_eq!(fetch.resource(), Some(Resource::GeneralInfo));
    assert!(fetch.to_string().contains("general info"), "got: {fetch}");
}

#[tokio::test]
async fn portfolio_500_fails_the_render() {
    let origin = FakeOrigin::start(Document::ok(r#"{"name": "X"}"#), Document::status(500)).await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let err = render_page(&source, &content()).await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::Status {
            resource: Resource::Portfolio,
            status: 500
        }
    ));
}

#[tokio::test]
async fn repeated_renders_are_identical() {
    let origin = FakeOrigin::with_portfolio(
        "X",
        r#"{"c": "https://c", "a": "https://a", "b": "https://b"}"#,
    )
    .await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let first = render_page(&source, &content()).await.unwrap();
    let second = render_page(&source, &content()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.projects.keys().collect::<Vec<_>>(), ["c", "a", "b"]);
}

#[tokio::test]
async fn anchor_target_is_the_raw_value() {
    let origin = FakeOrigin::with_portfolio("X", r#"{"K": "V"}"#).await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let html = render_document(&source, &content()).await.unwrap();

    assert!(html.contains(r#"href="V""#), "got: {html}");
    assert!(html.contains("<h3>K</h3>"));
}

#[tokio::test]
async fn malformed_payload_fails_the_render() {
    let origin = FakeOrigin::with_portfolio("X", r#"{"K": ["V"]}"#).await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let err = render_page(&source, &content()).await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::InvalidPayload {
            resource: Resource::Portfolio,
            ..
        }
    ));
}

#[tokio::test]
async fn both_documents_are_requested_together() {
    let origin = FakeOrigin::paired(
        Document::ok(r#"{"name": "X"}"#),
        Document::ok(r#"{"K": "V"}"#),
    )
    .await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    let page = tokio::time::timeout(
        Duration::from_secs(5),
        render_page(&source, &content()),
    )
    .await
    .expect("fetches were not in flight at the same time")
    .unwrap();

    assert_eq!(page.profile.name, "X");
    assert_eq!(page.projects.cards.len(), 1);
}

#[tokio::test]
async fn every_render_fetches_both_documents() {
    let origin = FakeOrigin::with_portfolio("X", r#"{"K": "V"}"#).await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();

    render_page(&source, &content()).await.unwrap();
    render_page(&source, &content()).await.unwrap();

    assert_eq!(origin.general_info_hits(), 2);
    assert_eq!(origin.portfolio_hits(), 2);
}

#[tokio::test]
async fn site_text_comes_from_configuration() {
    let origin = FakeOrigin::with_portfolio("X", r#"{"K": "V"}"#).await;
    let source = HttpDataSource::new(origin.endpoints()).unwrap();
    let content = SiteContent {
        title: "My Work".to_string(),
        tagline: "Building things".to_string(),
        link_label: "Open".to_string(),
    };

    let html = render_document(&source, &content).await.unwrap();

    assert!(html.contains("<title>My Work</title>"));
    assert!(html.contains("Building things"));
    assert!(html.contains(">Open</a>"));
}

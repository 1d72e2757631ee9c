use crate::common::{authority, mount_xml_once, sitemap_index, urlset};
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::ProgressBar;
use sitemap_sweep::crawler::ShutdownSignal;
use sitemap_sweep::sitemap::{traverse, TraversalLimits, TraversalOutcome};
use std::collections::BTreeSet;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENEROUS: TraversalLimits = TraversalLimits {
    max_pages: 1000,
    sitemap_cap: 100,
};

async fn walk(server: &MockServer, start: &[&str], limits: TraversalLimits) -> TraversalOutcome {
    walk_reporting(server, start, limits, &ProgressBar::hidden()).await
}

async fn walk_reporting(
    server: &MockServer,
    start: &[&str],
    limits: TraversalLimits,
    progress: &ProgressBar,
) -> TraversalOutcome {
    let initial: BTreeSet<String> = start
        .iter()
        .map(|route| format!("{}{}", server.uri(), route))
        .collect();
    traverse(
        &reqwest::Client::new(),
        initial,
        &[authority(server)],
        limits,
        &ShutdownSignal::new(),
        progress,
    )
    .await
}

#[tokio::test]
async fn test_diamond_and_cycle_visited_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // index -> a, b; a -> c; b -> c; c lists pages and points back at index
    mount_xml_once(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{base}/a.xml"), format!("{base}/b.xml")]),
    )
    .await;
    mount_xml_once(&server, "/a.xml", sitemap_index(&[format!("{base}/c.xml")])).await;
    mount_xml_once(&server, "/b.xml", sitemap_index(&[format!("{base}/c.xml")])).await;
    mount_xml_once(
        &server,
        "/c.xml",
        urlset(&[
            format!("{base}/one"),
            format!("{base}/two"),
            format!("{base}/sitemap.xml"),
        ]),
    )
    .await;

    let outcome = walk(&server, &["/sitemap.xml"], GENEROUS).await;

    assert_eq!(outcome.documents_processed, 4);
    assert_eq!(outcome.visited.len(), 4);
    assert_eq!(
        outcome.pages,
        BTreeSet::from([format!("{base}/one"), format!("{base}/two")])
    );
    assert!(!outcome.interrupted);
}

#[tokio::test]
async fn test_progress_reports_running_counts() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml_once(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{base}/pages.xml"), format!("{base}/missing.xml")]),
    )
    .await;
    mount_xml_once(
        &server,
        "/pages.xml",
        urlset(&[format!("{base}/one"), format!("{base}/two")]),
    )
    .await;

    let progress = ProgressBar::hidden();
    let outcome = walk_reporting(&server, &["/sitemap.xml"], GENEROUS, &progress).await;

    // The failed document still counts as processed
    assert_eq!(outcome.documents_processed, 3);
    assert_eq!(
        progress.message(),
        "Sitemaps processed: 3 | Pages collected: 2"
    );
}

#[tokio::test]
async fn test_page_cap_is_hard_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    let pages: Vec<String> = (0..10).map(|i| format!("{base}/page-{i}")).collect();
    mount_xml_once(&server, "/sitemap.xml", urlset(&pages)).await;

    let limits = TraversalLimits {
        max_pages: 3,
        sitemap_cap: 100,
    };
    let outcome = walk(&server, &["/sitemap.xml"], limits).await;

    assert_eq!(outcome.pages.len(), 3);
}

#[tokio::test]
async fn test_document_cap_is_hard_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    let nested: Vec<String> = (0..5).map(|i| format!("{base}/part-{i}.xml")).collect();
    mount_xml_once(&server, "/sitemap.xml", sitemap_index(&nested)).await;
    for i in 0..5 {
        Mock::given(method("GET"))
            .and(path(format!("/part-{i}.xml")))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(urlset(&[format!("{base}/p{i}")])),
            )
            .mount(&server)
            .await;
    }

    let limits = TraversalLimits {
        max_pages: 1000,
        sitemap_cap: 2,
    };
    let outcome = walk(&server, &["/sitemap.xml"], limits).await;

    assert_eq!(outcome.documents_processed, 2);
    assert_eq!(outcome.visited.len(), 2);
    assert_eq!(outcome.pages.len(), 1);
}

#[tokio::test]
async fn test_gzip_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(urlset(&[format!("{base}/compressed-page")]).as_bytes())
        .unwrap();
    let compressed = encoder.finish().unwrap();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed)
                .insert_header("content-type", "application/x-gzip"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = walk(&server, &["/sitemap.xml.gz"], GENEROUS).await;

    assert_eq!(
        outcome.pages,
        BTreeSet::from([format!("{base}/compressed-page")])
    );
}

#[tokio::test]
async fn test_urlset_sitemap_entries_are_followed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml_once(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{base}/news-sitemap.xml"),
            format!("{base}/home"),
        ]),
    )
    .await;
    mount_xml_once(
        &server,
        "/news-sitemap.xml",
        urlset(&[format!("{base}/article")]),
    )
    .await;

    let outcome = walk(&server, &["/sitemap.xml"], GENEROUS).await;

    assert!(outcome.visited.contains(&format!("{base}/news-sitemap.xml")));
    assert_eq!(
        outcome.pages,
        BTreeSet::from([format!("{base}/article"), format!("{base}/home")])
    );
}

#[tokio::test]
async fn test_filters_scope_binary_and_fragments() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml_once(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{base}/keep#section"),
            format!("{base}/brochure.pdf"),
            "https://elsewhere.example.org/page".to_string(),
        ]),
    )
    .await;

    let outcome = walk(&server, &["/sitemap.xml"], GENEROUS).await;

    assert_eq!(outcome.pages, BTreeSet::from([format!("{base}/keep")]));
}

#[tokio::test]
async fn test_bad_documents_contribute_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml_once(
        &server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{base}/missing.xml"),
            format!("{base}/broken.xml"),
            format!("{base}/text.xml"),
            format!("{base}/good.xml"),
        ]),
    )
    .await;
    mount_xml_once(&server, "/broken.xml", "<urlset><url><loc>".to_string()).await;
    mount_xml_once(&server, "/text.xml", "not xml at all".to_string()).await;
    mount_xml_once(&server, "/good.xml", urlset(&[format!("{base}/fine")])).await;

    let outcome = walk(&server, &["/sitemap.xml"], GENEROUS).await;

    assert_eq!(outcome.documents_processed, 5);
    assert_eq!(outcome.pages, BTreeSet::from([format!("{base}/fine")]));
}

#[tokio::test]
async fn test_shutdown_stops_traversal() {
    let server = MockServer::start().await;
    let shutdown = ShutdownSignal::new();
    shutdown.trigger();

    let outcome = traverse(
        &reqwest::Client::new(),
        BTreeSet::from([format!("{}/sitemap.xml", server.uri())]),
        &[authority(&server)],
        GENEROUS,
        &shutdown,
        &ProgressBar::hidden(),
    )
    .await;

    assert!(outcome.interrupted);
    assert_eq!(outcome.documents_processed, 0);
}

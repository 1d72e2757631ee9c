use crate::common::{mount_html, mount_robots, mount_xml_once, test_config, urlset};
use sitemap_sweep::crawler::{run_crawl, run_single_page, ShutdownSignal};
use sitemap_sweep::SweepError;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

#[tokio::test]
async fn test_widget_reference_found_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mount_xml_once(
        &server,
        "/sitemap.xml",
        urlset(&[format!("{base}/products/widget-overview")]),
    )
    .await;
    mount_html(
        &server,
        "/products/widget-overview",
        r#"<html><body><p>See the <a href="/products/widget">widget</a>.</p></body></html>"#,
    )
    .await;

    let mut config = test_config(&server, dir.path());
    config.scanner.max_match_pages_per_query = 3;
    let results_path = config.output.results_path.clone();

    let inputs = vec![
        format!("{base}/products/widget"),
        format!("{base}/products/gadget"),
    ];
    let report = run_crawl(config, &inputs, ShutdownSignal::new())
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);
    assert!(report.results[0].found());
    assert_eq!(
        report.results[0].pages,
        vec![format!("{base}/products/widget-overview")]
    );
    assert!(!report.results[1].found());

    let rows = read_rows(Path::new(&results_path));
    assert_eq!(
        rows[0],
        vec![
            "queried_url",
            "found",
            "match_count",
            "match_page_1",
            "match_page_2",
            "match_page_3"
        ]
    );
    assert_eq!(
        rows[1],
        vec![
            format!("{base}/products/widget"),
            "True".to_string(),
            "1".to_string(),
            format!("{base}/products/widget-overview"),
            String::new(),
            String::new(),
        ]
    );
    assert_eq!(rows[2][1], "False");
    assert_eq!(rows[2][2], "0");

    assert_eq!(report.summary.pages_discovered, 1);
    assert_eq!(report.summary.inputs_found, 1);

    let pages_dump = std::fs::read_to_string(dir.path().join("discovered_pages.txt")).unwrap();
    assert_eq!(pages_dump, format!("{base}/products/widget-overview\n"));
}

#[tokio::test]
async fn test_robots_disallowed_pages_never_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mount_robots(&server, "User-agent: *\nDisallow: /private\n").await;
    mount_xml_once(
        &server,
        "/sitemap.xml",
        urlset(&[format!("{base}/public"), format!("{base}/private/secret")]),
    )
    .await;

    let body = r#"<a href="/target-page">target</a>"#;
    mount_html(&server, "/public", body).await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, dir.path());
    let inputs = vec![format!("{base}/target-page")];
    let report = run_crawl(config, &inputs, ShutdownSignal::new())
        .await
        .unwrap();

    assert_eq!(report.summary.pages_discovered, 2);
    assert_eq!(report.summary.pages_allowed, 1);
    assert_eq!(report.results[0].pages, vec![format!("{base}/public")]);
}

#[tokio::test]
async fn test_per_pattern_cap_truncates_matches() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    let pages: Vec<String> = (0..5).map(|i| format!("{base}/page-{i}")).collect();
    mount_xml_once(&server, "/sitemap.xml", urlset(&pages)).await;
    for i in 0..5 {
        mount_html(
            &server,
            &format!("/page-{i}"),
            r#"<a href="/shared-target">shared</a>"#,
        )
        .await;
    }

    let mut config = test_config(&server, dir.path());
    config.scanner.max_match_pages_per_query = 2;
    let results_path = config.output.results_path.clone();

    let inputs = vec![format!("{base}/shared-target")];
    let report = run_crawl(config, &inputs, ShutdownSignal::new())
        .await
        .unwrap();

    assert_eq!(report.results[0].match_count(), 2);
    let rows = read_rows(Path::new(&results_path));
    assert_eq!(rows[1].len(), 5);
    assert_eq!(rows[1][2], "2");
}

#[tokio::test]
async fn test_links_only_scan_ignores_body_text() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mount_xml_once(&server, "/sitemap.xml", urlset(&[format!("{base}/mention")])).await;
    mount_html(
        &server,
        "/mention",
        &format!("<p>Plain-text mention of {base}/mentioned-only</p>"),
    )
    .await;

    let inputs = vec![format!("{base}/mentioned-only")];

    let mut config = test_config(&server, dir.path());
    config.scanner.scan_body = false;
    let report = run_crawl(config, &inputs, ShutdownSignal::new())
        .await
        .unwrap();
    assert!(!report.results[0].found());
}

#[tokio::test]
async fn test_relative_links_resolve_after_redirect() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    mount_xml_once(&server, "/sitemap.xml", urlset(&[format!("{base}/old-post")])).await;
    Mock::given(method("GET"))
        .and(path("/old-post"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/blog/post/"))
        .mount(&server)
        .await;
    mount_html(&server, "/blog/post/", r#"<a href="related">Related</a>"#).await;

    let inputs = vec![format!("{base}/blog/post/related")];

    let mut config = test_config(&server, dir.path());
    config.scanner.scan_body = false;
    let report = run_crawl(config, &inputs, ShutdownSignal::new())
        .await
        .unwrap();

    // Resolved against the served URL, recorded under the scheduled one
    assert!(report.results[0].found());
    assert_eq!(report.results[0].pages, vec![format!("{base}/old-post")]);
}

#[tokio::test]
async fn test_interrupted_run_writes_no_results() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let config = test_config(&server, dir.path());
    let results_path = config.output.results_path.clone();
    let shutdown = ShutdownSignal::new();
    shutdown.trigger();

    let outcome = run_crawl(config, &["https://example.com/x".to_string()], shutdown).await;

    assert!(matches!(outcome, Err(SweepError::Interrupted)));
    assert!(!Path::new(&results_path).exists());
}

#[tokio::test]
async fn test_single_page_mode() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempdir().unwrap();

    // Served out of scope on purpose: single-page mode skips filtering
    mount_robots(&server, "User-agent: *\nDisallow: /\n").await;
    mount_html(
        &server,
        "/landing",
        r#"<a href="https://www.partner.example.com/offer#terms">offer</a>"#,
    )
    .await;

    let mut config = test_config(&server, dir.path());
    config.domains = vec!["unrelated.example.net".to_string()];
    let test_results_path = config.output.test_results_path.clone();

    let inputs = vec![
        "https://www.partner.example.com/offer".to_string(),
        "https://partner.example.com/other".to_string(),
    ];
    let results = run_single_page(config, &format!("{base}/landing"), &inputs)
        .await
        .unwrap()
        .unwrap();

    assert!(results[0].found());
    assert_eq!(results[0].pages, vec![format!("{base}/landing")]);
    assert!(!results[1].found());

    let rows = read_rows(Path::new(&test_results_path));
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["queried_url", "found", "match_count", "match_page_1"]);
    assert_eq!(rows[1][1], "True");
    assert_eq!(rows[2], vec!["https://partner.example.com/other", "False", "0", ""]);
}

#[tokio::test]
async fn test_single_page_fetch_failure_writes_nothing() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let config = test_config(&server, dir.path());
    let test_results_path = config.output.test_results_path.clone();

    let results = run_single_page(
        config,
        &format!("{}/missing", server.uri()),
        &["https://example.com/x".to_string()],
    )
    .await
    .unwrap();

    assert!(results.is_none());
    assert!(!Path::new(&test_results_path).exists());
}

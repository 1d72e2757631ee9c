use sitemap_sweep::config::{Config, InputConfig, OutputConfig, ScannerConfig};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The server's `host:port`, used as the in-scope domain
pub fn authority(server: &MockServer) -> String {
    server.address().to_string()
}

/// Creates a test configuration scoped to the mock server
pub fn test_config(server: &MockServer, dir: &Path) -> Config {
    let out = |name: &str| dir.join(name).to_string_lossy().into_owned();

    Config {
        domains: vec![authority(server)],
        scanner: ScannerConfig {
            schemes: vec!["http".to_string()],
            concurrency: 4,
            request_timeout_secs: 5,
            politeness_delay_ms: 0,
            show_progress: false,
            ..ScannerConfig::default()
        },
        input: InputConfig {
            path: out("inputs.txt"),
        },
        output: OutputConfig {
            results_path: out("results.csv"),
            test_results_path: out("test_results.csv"),
            diagnostics_dir: dir.to_string_lossy().into_owned(),
        },
        ..Config::default()
    }
}

pub fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{}</loc></url>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

pub fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{}</loc></sitemap>\n", loc))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

/// Serves `body` as XML at `route`, expecting exactly one request
pub async fn mount_xml_once(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

pub async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

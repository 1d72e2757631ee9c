use crate::common::{authority, mount_robots};
use sitemap_sweep::sitemap::discover_sitemap_urls;
use std::collections::BTreeSet;
use wiremock::MockServer;

fn schemes() -> Vec<String> {
    vec!["http".to_string()]
}

#[tokio::test]
async fn test_robots_sitemaps_and_default() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(
        &server,
        &format!(
            "User-agent: *\nDisallow: /admin\n\nSitemap: {base}/posts.xml\nSITEMAP:{base}/pages.xml\n  sitemap:   {base}/news.xml\n"
        ),
    )
    .await;

    let client = reqwest::Client::new();
    let found = discover_sitemap_urls(&client, &authority(&server), &schemes()).await;

    let expected: BTreeSet<String> = [
        format!("{base}/posts.xml"),
        format!("{base}/pages.xml"),
        format!("{base}/news.xml"),
        format!("{base}/sitemap.xml"),
    ]
    .into();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_missing_robots_yields_default_only() {
    // Unmatched requests get a 404
    let server = MockServer::start().await;

    let client = reqwest::Client::new();
    let found = discover_sitemap_urls(&client, &authority(&server), &schemes()).await;

    assert_eq!(
        found,
        BTreeSet::from([format!("{}/sitemap.xml", server.uri())])
    );
}

#[tokio::test]
async fn test_default_listed_in_robots_not_duplicated() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_robots(&server, &format!("Sitemap: {base}/sitemap.xml\n")).await;

    let client = reqwest::Client::new();
    let found = discover_sitemap_urls(&client, &authority(&server), &schemes()).await;

    assert_eq!(found.len(), 1);
}

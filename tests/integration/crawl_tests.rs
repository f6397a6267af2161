//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! web fetcher and processors end-to-end.

use linkcrawl::config::{Config, FetcherConfig, OutputMode};
use linkcrawl::crawler::{crawl, Crawler, WebFetcher};
use linkcrawl::output::{PrintProcessor, SaveProcessor};
use linkcrawl::state::Outcome;
use linkcrawl::{ConfigError, CrawlError};
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_fetcher_config(stay_on_domain: bool) -> FetcherConfig {
    FetcherConfig {
        keep_fragment: false,
        keep_query: false,
        stay_on_domain,
        user_agent: "TestBot/1.0".to_string(),
        request_timeout_secs: 5,
    }
}

fn html_page(title: &str, links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, anchors
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, page: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(page)
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_saves_pages_within_depth() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html_page("Home", &["/page1", "/page2"]), 1).await;
    mount_page(
        &mock_server,
        "/page1",
        html_page("Page 1", &["/page3", "/"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/page2", html_page("Page 2", &[]), 1).await;
    // Three hops away from the seed: beyond a depth of 2
    mount_page(&mock_server, "/page3", html_page("Page 3", &[]), 0).await;

    let dir = tempdir().expect("Failed to create temp dir");
    let fetcher = WebFetcher::new(&create_fetcher_config(true)).unwrap();
    let crawler = Crawler::new(fetcher, SaveProcessor::new(dir.path()), 5);

    let report = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.pending(), 0);
    assert_eq!(report.outcome(&format!("{}/page3", base_url)), None);

    let host = base_url.trim_start_matches("http://");
    let saved = std::fs::read_to_string(dir.path().join(format!("{}-page2.txt", host)))
        .expect("page2 should be saved");
    assert_eq!(saved, "Page 2");
    assert!(dir.path().join(format!("{}-.txt", host)).exists());
    assert!(dir.path().join(format!("{}-page1.txt", host)).exists());
    assert!(!dir.path().join(format!("{}-page3.txt", host)).exists());

    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_child_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html_page("Root", &["/a", "/b"]), 1).await;
    mount_page(&mock_server, "/a", html_page("A", &["/shared", "/b"]), 1).await;
    mount_page(&mock_server, "/b", html_page("B", &["/shared", "/a"]), 1).await;
    mount_page(&mock_server, "/shared", html_page("Shared", &["/"]), 1).await;

    let fetcher = WebFetcher::new(&create_fetcher_config(true)).unwrap();
    let crawler = Crawler::new(fetcher, PrintProcessor, 8);

    let report = crawler.crawl(&format!("{}/", base_url), 5).await;

    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.claimed(), 4);

    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failed_page_does_not_stop_siblings() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html_page("Home", &["/broken", "/ok"]), 1).await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500), 1).await;
    mount_page(&mock_server, "/ok", html_page("Ok", &["/deeper"]), 1).await;
    mount_page(&mock_server, "/deeper", html_page("Deeper", &[]), 1).await;

    let dir = tempdir().expect("Failed to create temp dir");
    let fetcher = WebFetcher::new(&create_fetcher_config(true)).unwrap();
    let crawler = Crawler::new(fetcher, SaveProcessor::new(dir.path()), 2);

    let report = crawler.crawl(&format!("{}/", base_url), 3).await;

    match report.outcome(&format!("{}/broken", base_url)) {
        Some(Outcome::Failed(reason)) => assert!(reason.contains("500")),
        other => panic!("expected a failure, got {:?}", other),
    }
    assert_eq!(
        report.outcome(&format!("{}/deeper", base_url)),
        Some(&Outcome::Succeeded)
    );
    assert_eq!(report.succeeded(), 3);

    let host = base_url.trim_start_matches("http://");
    assert!(!dir.path().join(format!("{}-broken.txt", host)).exists());
    assert!(dir.path().join(format!("{}-deeper.txt", host)).exists());

    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_empty_body_is_a_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html_page("Home", &["/empty"]), 1).await;
    mount_page(&mock_server, "/empty", ResponseTemplate::new(200), 1).await;

    let fetcher = WebFetcher::new(&create_fetcher_config(true)).unwrap();
    let crawler = Crawler::new(fetcher, PrintProcessor, 2);

    let report = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert!(matches!(
        report.outcome(&format!("{}/empty", base_url)),
        Some(Outcome::Failed(_))
    ));
    assert_eq!(report.succeeded(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stay_on_domain() {
    let home = MockServer::start().await;
    let elsewhere = MockServer::start().await;
    let external = format!("{}/external", elsewhere.uri());

    mount_page(&home, "/", html_page("Home", &[external.as_str()]), 2).await;
    // Only the roaming crawl below may reach the other server
    mount_page(&elsewhere, "/external", html_page("External", &[]), 1).await;

    let seed = format!("{}/", home.uri());

    let staying = Crawler::new(
        WebFetcher::new(&create_fetcher_config(true)).unwrap(),
        PrintProcessor,
        2,
    );
    let report = staying.crawl(&seed, 3).await;
    assert_eq!(report.claimed(), 1);

    let roaming = Crawler::new(
        WebFetcher::new(&create_fetcher_config(false)).unwrap(),
        PrintProcessor,
        2,
    );
    let report = roaming.crawl(&seed, 3).await;
    assert_eq!(report.claimed(), 2);
    assert_eq!(report.outcome(&external), Some(&Outcome::Succeeded));

    home.verify().await;
    elsewhere.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit_with_slow_server() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let children: Vec<String> = (0..12).map(|i| format!("/slow{}", i)).collect();
    let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();

    mount_page(&mock_server, "/", html_page("Home", &child_refs), 1).await;
    for child in &children {
        mount_page(
            &mock_server,
            child,
            html_page(child, &[]).set_delay(Duration::from_millis(50)),
            1,
        )
        .await;
    }

    let fetcher = WebFetcher::new(&create_fetcher_config(true)).unwrap();
    let crawler = Crawler::new(fetcher, PrintProcessor, 3);

    let report = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert_eq!(report.succeeded(), 13);
    assert!(report.peak_in_flight <= 3);
    assert!(report.peak_in_flight >= 1);

    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_from_config_clamps_depth() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html_page("Home", &["/child"]), 1).await;
    mount_page(&mock_server, "/child", html_page("Child", &["/grandchild"]), 1).await;
    mount_page(&mock_server, "/grandchild", html_page("Grandchild", &[]), 0).await;

    let mut config = Config::default();
    config.crawler.start = format!("{}/", base_url);
    // Raised to 2: the seed and its children
    config.crawler.max_depth = 1;
    config.crawler.max_concurrent_fetchers = 0;
    config.fetcher = create_fetcher_config(true);
    config.output.mode = OutputMode::Print;

    let report = crawl(&config, PrintProcessor).await.expect("crawl starts");

    assert_eq!(report.max_depth, 2);
    assert_eq!(report.max_concurrent_fetchers, 1);
    assert_eq!(report.succeeded(), 2);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_crawl_from_config_rejects_bad_seed() {
    let mut config = Config::default();
    config.crawler.start = "not a url".to_string();

    assert!(matches!(
        crawl(&config, PrintProcessor).await,
        Err(CrawlError::Config(ConfigError::InvalidUrl(_)))
    ));
}

//! Integration tests for the crawler
//!
//! Crawl runs use an in-memory site behind the `Fetcher` trait, since every
//! accepted URL is forced to https. The reqwest transport itself is tested
//! against wiremock servers.

use scopecrawl::crawler::{fetch_url, CrawlTarget, FetchOutcome, Fetcher, HttpFetcher};
use scopecrawl::output::CrawlReport;
use scopecrawl::url::Extension;
use scopecrawl::{Crawler, CrawlerConfig, StopReason, VisitLabel, VisitedRecord};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// In-memory website: URL to (status, body), unknown URLs answer 404
#[derive(Clone, Default)]
struct StubSite {
    pages: HashMap<String, (u16, String)>,
    delay: Option<Duration>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl StubSite {
    fn page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), (status, body.to_string()));
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Fetcher for StubSite {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchOutcome> + Send {
        self.fetched.lock().unwrap().push(url.to_string());
        let response = self.pages.get(url).cloned();
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match response {
                Some((status, body)) => FetchOutcome::new(Some(body), status),
                None => FetchOutcome::new(None, 404),
            }
        }
    }
}

const ROOT: &str = "https://example.com/";

fn config(workers: u32) -> CrawlerConfig {
    CrawlerConfig {
        max_workers: workers,
        max_time: 10,
        ..CrawlerConfig::default()
    }
}

fn root_only(config: CrawlerConfig) -> Crawler {
    Crawler::new("example.com", config)
        .unwrap()
        .with_seeds(vec![CrawlTarget::new(ROOT, 0, Some(Extension::Html))])
}

/// Runs the crawl, failing the test instead of hanging if workers never exit
async fn run(crawler: &Crawler, site: StubSite) -> CrawlReport {
    tokio::time::timeout(Duration::from_secs(20), crawler.run_with(site))
        .await
        .expect("crawl did not terminate")
}

fn find(report: &CrawlReport, url: &str) -> Option<VisitedRecord> {
    let buckets = &report.urls;
    buckets
        .successful_requests
        .iter()
        .chain(&buckets.unsuccessful_requests)
        .chain(&buckets.not_requested)
        .find(|(u, _)| u == url)
        .map(|(_, record)| *record)
}

#[tokio::test]
async fn test_single_page_site_ends_on_empty_queue() {
    let site = StubSite::default().page(ROOT, 200, "<html><body>nothing here</body></html>");
    let report = run(&root_only(config(1)), site).await;

    assert_eq!(report.stop_reason, StopReason::EmptyQueue);
    assert_eq!(report.number_of_urls, 1);
    assert_eq!(report.domain, "example.com");
    assert_eq!(find(&report, ROOT), Some(VisitedRecord::crawled(1, 200)));
}

#[tokio::test]
async fn test_links_are_followed_once() {
    let site = StubSite::default()
        .page(
            ROOT,
            200,
            r#"<a href="/aa">a</a><a href="/bb">b</a><a href="https://example.com/">home</a>"#,
        )
        .page("https://example.com/aa", 200, r#"<a href="/bb">b</a><a href="/cc">c</a>"#)
        .page("https://example.com/bb", 200, r#"<a href="/aa#top">a</a>"#)
        .page("https://example.com/cc", 200, "<p>leaf</p>");

    let report = run(&root_only(config(3)), site.clone()).await;

    assert_eq!(report.stop_reason, StopReason::EmptyQueue);
    assert_eq!(report.number_of_urls, 4);
    assert_eq!(report.urls.successful_requests.len(), 4);

    let mut fetched = site.fetched();
    fetched.sort();
    assert_eq!(
        fetched,
        vec![
            "https://example.com/",
            "https://example.com/aa",
            "https://example.com/bb",
            "https://example.com/cc",
        ]
    );
}

#[tokio::test]
async fn test_depth_grows_by_one_per_hop() {
    let site = StubSite::default()
        .page(ROOT, 200, r#"<a href="/p1">1</a>"#)
        .page("https://example.com/p1", 200, r#"<a href="/p2">2</a>"#)
        .page("https://example.com/p2", 200, r#"<a href="/p3">3</a>"#)
        .page("https://example.com/p3", 200, r#"<a href="/p4">4</a>"#);

    let report = run(
        &root_only(CrawlerConfig {
            max_crawl_depth: 3,
            ..config(1)
        }),
        site.clone(),
    )
    .await;

    assert_eq!(find(&report, ROOT).unwrap().depth, 1);
    assert_eq!(find(&report, "https://example.com/p1").unwrap().depth, 2);
    assert_eq!(find(&report, "https://example.com/p2").unwrap().depth, 3);
    assert_eq!(
        find(&report, "https://example.com/p3"),
        Some(VisitedRecord::max_depth_reached(3))
    );
    assert_eq!(find(&report, "https://example.com/p4"), None);
    assert!(!site.fetched().contains(&"https://example.com/p3".to_string()));
    assert_eq!(report.urls.not_requested.len(), 1);
}

#[tokio::test]
async fn test_depth_limit_of_one_never_queues_links() {
    let site = StubSite::default().page(ROOT, 200, r#"<a href="/login">login</a>"#);
    let report = run(
        &root_only(CrawlerConfig {
            max_crawl_depth: 1,
            ..config(2)
        }),
        site.clone(),
    )
    .await;

    assert_eq!(report.stop_reason, StopReason::EmptyQueue);
    assert_eq!(site.fetched(), vec![ROOT]);
    let terminal = find(&report, "https://example.com/login").unwrap();
    assert_eq!(terminal.label, VisitLabel::MaxCrawlDepthReached);
    assert_eq!(terminal.status, 900);
}

#[tokio::test]
async fn test_rate_limit_stops_every_worker() {
    let site = StubSite::default()
        .page(
            ROOT,
            200,
            r#"<a href="/aa">a</a><a href="/bb">b</a><a href="/cc">c</a><a href="/dd">d</a>"#,
        )
        .page("https://example.com/aa", 429, "slow down");

    let report = run(&root_only(config(3)), site).await;

    assert_eq!(report.stop_reason, StopReason::RateLimited);
    assert_eq!(
        find(&report, "https://example.com/aa"),
        Some(VisitedRecord::crawled(2, 429))
    );
}

#[tokio::test]
async fn test_time_budget_is_enforced() {
    let mut site = StubSite::default().slow(Duration::from_millis(1200));
    for i in 0..10 {
        site = site.page(
            &format!("https://example.com/p{}", i),
            200,
            &format!(r#"<a href="/p{}">next</a>"#, i + 1),
        );
    }
    site = site.page(ROOT, 200, r#"<a href="/p0">start</a>"#);

    let report = run(
        &root_only(CrawlerConfig {
            max_time: 1,
            ..config(1)
        }),
        site,
    )
    .await;

    assert_eq!(report.stop_reason, StopReason::RanOutOfTime);
    assert_eq!(report.number_of_urls, 1);
    assert!(report.crawling_time >= 1.0);
}

#[tokio::test]
async fn test_missing_body_is_labeled() {
    let site = StubSite::default().page(ROOT, 200, "");
    let report = run(&root_only(config(1)), site).await;

    let record = find(&report, ROOT).unwrap();
    assert_eq!(record.label, VisitLabel::FailedToGetBody);
    assert_eq!(record.status, 200);
    assert_eq!(report.urls.successful_requests.len(), 1);
}

#[tokio::test]
async fn test_frontier_discipline() {
    let body = r#"<a href="/aa">a</a><a href="/bb">b</a><a href="/cc">c</a>"#;

    for (breadth_first, expected) in [(true, ["aa", "bb", "cc"]), (false, ["cc", "bb", "aa"])] {
        let site = StubSite::default().page(ROOT, 200, body);
        let crawler = root_only(CrawlerConfig {
            breadth_first_search: breadth_first,
            ..config(1)
        });
        run(&crawler, site.clone()).await;

        let expected: Vec<String> = std::iter::once(ROOT.to_string())
            .chain(expected.iter().map(|p| format!("https://example.com/{}", p)))
            .collect();
        assert_eq!(site.fetched(), expected);
    }
}

#[tokio::test]
async fn test_default_seeds_are_all_requested() {
    let site = StubSite::default()
        .page(ROOT, 200, "<p>home</p>")
        .page(
            "https://example.com/robots.txt",
            200,
            "User-agent: *\nDisallow: /private\nSitemap: https://example.com/sitemap.xml",
        )
        .page("https://example.com/private", 403, "forbidden");

    let crawler = Crawler::new("example.com", config(2)).unwrap();
    let report = run(&crawler, site.clone()).await;

    assert_eq!(report.stop_reason, StopReason::EmptyQueue);
    let fetched = site.fetched();
    for seed in crawler.seeds() {
        assert!(fetched.contains(&seed.url), "seed {} not fetched", seed.url);
    }
    // sitemap.xml was seeded, so robots.txt rediscovering it changes nothing
    assert_eq!(
        fetched
            .iter()
            .filter(|u| u.as_str() == "https://example.com/sitemap.xml")
            .count(),
        1
    );
    assert_eq!(
        find(&report, "https://example.com/private").unwrap().status,
        403
    );
    assert_eq!(
        find(&report, "https://dev.example.com").unwrap().status,
        404
    );
}

#[test]
fn test_invalid_config_fails_before_crawling() {
    let config = CrawlerConfig {
        max_path_depth: 21,
        ..CrawlerConfig::default()
    };
    assert!(Crawler::new("example.com", config).is_err());
}

#[tokio::test]
async fn test_http_fetcher_passes_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let base = mock_server.uri();

    let ok = fetch_url(&client, &format!("{}/page", base)).await;
    assert_eq!(ok, FetchOutcome::new(Some("<html>hi</html>".to_string()), 200));

    let missing = fetch_url(&client, &format!("{}/missing", base)).await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body.as_deref(), Some("not found"));

    let empty = fetch_url(&client, &format!("{}/empty", base)).await;
    assert_eq!(empty.status, 204);
    assert_eq!(empty.body, None);
}

#[tokio::test]
async fn test_http_fetcher_connection_failure_is_400() {
    // nothing listens on port 1
    let fetcher = HttpFetcher::new(&BTreeMap::new()).unwrap();
    let outcome = fetcher.fetch("http://127.0.0.1:1/gone").await;
    assert_eq!(outcome, FetchOutcome::transport_failure());
}

#[tokio::test]
async fn test_http_fetcher_sends_configured_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "scopecrawl-test"))
        .and(header("x-team", "red"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let mut headers = BTreeMap::new();
    headers.insert("User-Agent".to_string(), "scopecrawl-test".to_string());
    headers.insert("X-Team".to_string(), "red".to_string());
    let fetcher = HttpFetcher::new(&headers).unwrap();

    let outcome = fetcher.fetch(&format!("{}/", mock_server.uri())).await;
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.body.as_deref(), Some("ok"));
}

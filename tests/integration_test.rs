use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

use linkharvest::crawler;
use linkharvest::crawler::{CrawlCoordinator, CrawlEvent, CrawlerConfig, HttpFetcher};

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_over_mock_site() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/start",
        r#"
        <html><body>
            <a href="/a">A</a>
            <a href="/b">B</a>
            <a href="mailto:admin@site">contact</a>
        </body></html>
    "#,
    )
    .await;
    mount_page(&server, "/a", r#"<a href="/c">C</a>"#).await;
    mount_page(&server, "/b", r#"<a href="/c">C</a>"#).await;
    mount_page(&server, "/c", r#"<a href="/a">back</a>"#).await;

    let config = Arc::new(
        CrawlerConfig::new()
            .with_worker_count(3)
            .with_max_depth(Some(2))
            .with_request_timeout(5),
    );
    let fetcher = Arc::new(HttpFetcher::new(5));
    let (mut coordinator, mut events) = CrawlCoordinator::new(config, fetcher);

    let seed = Url::parse(&format!("{}/start", server.uri()))?;
    coordinator.start_search(seed).await;

    let mut found = Vec::new();
    let mut finished_count = 0;
    loop {
        let event = tokio::time::timeout(Duration::from_secs(15), events.recv())
            .await?
            .expect("event channel closed");
        match event {
            CrawlEvent::LinkFound { address, .. } => found.push(address),
            CrawlEvent::Finished => {
                finished_count += 1;
                break;
            }
        }
    }

    found.sort();
    let expected: Vec<String> = ["/a", "/b", "/c"]
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect();
    assert_eq!(found, expected, "each reachable link reported exactly once");
    assert_eq!(finished_count, 1);
    assert_eq!(coordinator.store().len(), 3);

    let store = coordinator.store();
    let links: Vec<(String, crawler::WorkerId)> = store.links();
    assert!(links.iter().all(|(_, worker)| *worker < 3));

    Ok(())
}

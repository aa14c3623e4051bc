use anyhow::Result;
use linkharvest::{config, crawler};
use log2::*;
use std::sync::Arc;
use std::time::Instant;

/// Indicates start time of the program, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .level(cfg.log_level.to_string())
        .start();

    let seed = cfg.seed_url()?;

    let crawler_config = Arc::new(
        crawler::CrawlerConfig::new()
            .with_worker_count(cfg.workers)
            .with_max_depth(cfg.depth)
            .with_request_timeout(cfg.request_timeout),
    );
    let fetcher = Arc::new(crawler::HttpFetcher::new(crawler_config.request_timeout_sec));

    let (mut coordinator, mut events) = crawler::CrawlCoordinator::new(crawler_config, fetcher);
    coordinator.start_search(seed).await;

    while let Some(event) = events.recv().await {
        match event {
            crawler::CrawlEvent::LinkFound { address, worker } => {
                println!("#{} - {}", worker, address);
            }
            crawler::CrawlEvent::Finished => break,
        }
    }

    info!(
        "Searching is finished! {} addresses found in {:?}",
        coordinator.store().len(),
        START_TIME.elapsed()
    );
    Ok(())
}

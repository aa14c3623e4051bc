use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log2::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::config::PAGE_REQUEST_TIMEOUT_SEC;

/// Supplies the textual content of a page.
///
/// Any failure (connect error, timeout, bad status, unsupported scheme)
/// yields the empty string; fetching never errors toward the traversal.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, address: &Url) -> String;
}

/// HTTP-backed fetcher with a per-request timeout.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout_sec: u64) -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(timeout_sec),
        }
    }

    async fn get_page(&self, address: &Url) -> Result<String> {
        let response = self
            .client
            .get(address.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch page: {}", response.status()));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(PAGE_REQUEST_TIMEOUT_SEC)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, address: &Url) -> String {
        match self.get_page(address).await {
            Ok(content) => content,
            Err(err) => {
                debug!("fetch of {} failed: {}", address, err);
                String::new()
            }
        }
    }
}

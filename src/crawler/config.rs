use std::sync::Arc;

/// Default timeout for page requests in seconds
pub const PAGE_REQUEST_TIMEOUT_SEC: u64 = 2;

/// Configuration for one crawl
pub struct CrawlerConfig {
    pub worker_count: usize,
    /// Remaining recursion levels below the seed page. `None` crawls without
    /// a depth limit; `Some(0)` records the seed page's links only.
    pub max_depth: Option<u32>,
    pub request_timeout_sec: u64,
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self {
            worker_count: 1,
            max_depth: None,
            request_timeout_sec: PAGE_REQUEST_TIMEOUT_SEC,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        if worker_count > 0 {
            self.worker_count = worker_count;
        }
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;

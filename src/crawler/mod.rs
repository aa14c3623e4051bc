pub mod config;
pub mod coordinator;
pub mod fetch;
pub mod page;
pub mod store;
pub mod worker;


pub use config::{CrawlerConfig, CrawlerConfigRef, PAGE_REQUEST_TIMEOUT_SEC};
pub use coordinator::{CrawlCoordinator, CrawlEvent};
pub use fetch::{Fetch, HttpFetcher};
pub use page::{extract_links, resolve_address};
pub use store::{LinkStore, WorkerId};
pub use worker::Worker;

use log2::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use url::Url;

use super::config::CrawlerConfigRef;
use super::fetch::Fetch;
use super::store::{LinkStore, WorkerId};
use super::worker::Worker;

/// Upward notification from a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// An address was recorded for the first time, by `worker`.
    LinkFound { address: String, worker: WorkerId },
    /// Every worker of the crawl has terminated. Fired once per crawl.
    Finished,
}

/// Creates the worker pool for a crawl, shares the seed page's content
/// across it, and turns the workers' individual completions into a single
/// crawl-finished notification.
pub struct CrawlCoordinator {
    config: CrawlerConfigRef,
    fetcher: Arc<dyn Fetch>,
    store: Arc<LinkStore>,
    workers: Vec<Worker>,
    events: UnboundedSender<CrawlEvent>,
    finished: Arc<AtomicBool>,
}

impl CrawlCoordinator {
    /// Returns the coordinator together with the receiving end of its event
    /// channel. The channel outlives individual crawls; every first-seen
    /// link is forwarded on it unchanged, straight from the store's hook.
    pub fn new(
        config: CrawlerConfigRef,
        fetcher: Arc<dyn Fetch>,
    ) -> (Self, UnboundedReceiver<CrawlEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        let hook_events = events.clone();
        let store = Arc::new(LinkStore::with_hook(Box::new(move |address, worker| {
            let _ = hook_events.send(CrawlEvent::LinkFound {
                address: address.to_string(),
                worker,
            });
        })));

        let coordinator = Self {
            config,
            fetcher,
            store,
            workers: Vec::new(),
            events,
            finished: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, receiver)
    }

    /// Start a crawl from `seed`, replacing any crawl still in progress.
    ///
    /// The seed page is fetched once here and its content handed to every
    /// worker, so the pool does not fetch the same page N times. The seed
    /// address itself is not recorded; only links discovered from it are.
    pub async fn start_search(&mut self, seed: Url) {
        self.stop_search();
        self.store.clear();
        self.finished = Arc::new(AtomicBool::new(false));

        let content = self.fetcher.fetch(&seed).await;
        debug!("fetched {} bytes of seed content from {}", content.len(), seed);

        let mut workers: Vec<Worker> = (0..self.config.worker_count)
            .map(|id| Worker::new(id, Arc::clone(&self.store), Arc::clone(&self.fetcher)))
            .collect();
        let done_slots: Arc<Vec<AtomicBool>> = Arc::new(
            (0..workers.len()).map(|_| AtomicBool::new(false)).collect(),
        );

        for (slot, worker) in workers.iter_mut().enumerate() {
            let done_slots = Arc::clone(&done_slots);
            let fired = Arc::clone(&self.finished);
            let events = self.events.clone();
            worker.start(
                seed.clone(),
                Some(content.clone()),
                self.config.max_depth,
                move || {
                    // Reactive all-done check, run from each worker's own
                    // completion; the compare_exchange keeps Finished
                    // single-fire even when the last two workers tie.
                    done_slots[slot].store(true, Ordering::SeqCst);
                    if done_slots.iter().all(|done| done.load(Ordering::SeqCst))
                        && fired
                            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                            .is_ok()
                    {
                        let _ = events.send(CrawlEvent::Finished);
                    }
                },
            );
        }

        info!("started {} workers from {}", workers.len(), seed);
        self.workers = workers;
    }

    /// Signal every live worker to stop and forget them. Does not wait:
    /// workers unwind at their own pace, and a stopped crawl still delivers
    /// its finished notification once the last of them has.
    pub fn stop_search(&mut self) {
        for worker in &self.workers {
            worker.stop();
        }
        self.workers.clear();
    }

    pub fn store(&self) -> Arc<LinkStore> {
        Arc::clone(&self.store)
    }

    /// Whether the current crawl has delivered its finished notification.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

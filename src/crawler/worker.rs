use anyhow::Result;
use log2::{debug, error};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::fetch::Fetch;
use super::page;
use super::store::{LinkStore, WorkerId};

/// One concurrent unit of crawl execution.
///
/// A worker traverses the link graph depth-first from a starting address,
/// recording every first-seen link in the shared store and descending into
/// links it won, until its depth budget runs out, no unclaimed links remain
/// on its branch, or it is stopped.
pub struct Worker {
    id: WorkerId,
    store: Arc<LinkStore>,
    fetcher: Arc<dyn Fetch>,
    cancel: CancellationToken,
    finished: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Everything a traversal needs, threaded explicitly through the recursion.
struct CrawlContext {
    id: WorkerId,
    store: Arc<LinkStore>,
    fetcher: Arc<dyn Fetch>,
    cancel: CancellationToken,
}

impl Worker {
    pub fn new(id: WorkerId, store: Arc<LinkStore>, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            id,
            store,
            fetcher,
            cancel: CancellationToken::new(),
            finished: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Begin traversing from `address`, replacing any run still in progress.
    ///
    /// `content`, when given, is used in place of fetching `address` again.
    /// `on_done` runs after the traversal terminates for any reason: natural
    /// completion, cancellation, or an unexpected error.
    pub fn start<F>(
        &mut self,
        address: Url,
        content: Option<String>,
        depth: Option<u32>,
        on_done: F,
    ) where
        F: FnOnce() + Send + 'static,
    {
        self.stop();
        self.cancel = CancellationToken::new();
        // fresh flag per run, so a replaced run's tail cannot mark this one
        self.finished = Arc::new(AtomicBool::new(false));

        let ctx = CrawlContext {
            id: self.id,
            store: Arc::clone(&self.store),
            fetcher: Arc::clone(&self.fetcher),
            cancel: self.cancel.clone(),
        };
        let finished = Arc::clone(&self.finished);

        self.handle = Some(tokio::spawn(async move {
            if let Err(err) = crawl_links(&ctx, address, content, depth).await {
                error!("worker {} stopped on error: {}", ctx.id, err);
            }
            finished.store(true, Ordering::SeqCst);
            on_done();
        }));
    }

    /// Signal cancellation to the current run. Does not block; the traversal
    /// observes the signal at its next checkpoint and unwinds silently.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Wait for the current run's task to terminate.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Depth-first traversal of the links reachable from `address`.
///
/// `remaining` is the number of levels the traversal may still descend below
/// this page; `None` means no limit. Cancellation is checked at the top of
/// every call and around each store insertion, and unwinds with `Ok`.
fn crawl_links<'a>(
    ctx: &'a CrawlContext,
    address: Url,
    content: Option<String>,
    remaining: Option<u32>,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        if ctx.cancel.is_cancelled() {
            return Ok(());
        }

        let content = match content {
            Some(content) => content,
            None => ctx.fetcher.fetch(&address).await,
        };

        for link in page::extract_links(&content)? {
            let next = page::resolve_address(&address, &link)?;

            if ctx.cancel.is_cancelled() {
                return Ok(());
            }
            if !ctx.store.try_add(next.as_str(), ctx.id) {
                debug!("worker {}: already seen {}", ctx.id, next);
                continue;
            }
            if ctx.cancel.is_cancelled() {
                return Ok(());
            }

            let next_remaining = match remaining {
                // Depth exhausted below this page: the link is recorded but
                // not descended into.
                Some(0) => continue,
                Some(level) => Some(level - 1),
                None => None,
            };
            crawl_links(ctx, next, None, next_remaining).await?;
        }

        Ok(())
    })
}

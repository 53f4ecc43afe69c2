//! Search execution and orchestration

use super::models::{SearchConfig, SearchQuery};
use super::resolver::NameResolver;
use crate::cache::NameCache;
use crate::metrics::{MetricsSnapshot, SearchMetrics};
use crate::results::{
    BrowserSink, LogSink, Match, MatchKind, MatchSink, PermalinkOpener, SystemOpener,
};
use crate::slack::{SlackApi, SlackError};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// One fetched page, normalised across files and messages
struct PageResult {
    pages: u32,
    matches: Vec<Match>,
}

/// What happened to a single page task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOutcome {
    pub page: u32,
    /// Matches handed to the sink
    pub matches: usize,
    pub failed: bool,
}

/// Search executor that paginates a Slack search and fans out one task per page
pub struct Search {
    api: Arc<dyn SlackApi>,
    resolver: NameResolver,
    sink: Arc<dyn MatchSink>,
    config: SearchConfig,
    /// Gates page tasks when `max_concurrency` is set
    limiter: Option<Semaphore>,
    metrics: Arc<SearchMetrics>,
}

impl Search {
    /// Create a new search executor.
    ///
    /// Matches are logged, or opened in the browser when
    /// `config.open_in_browser` is set.
    pub fn new(api: Arc<dyn SlackApi>, config: SearchConfig) -> Self {
        let sink: Arc<dyn MatchSink> = if config.open_in_browser {
            Arc::new(BrowserSink::new(SystemOpener))
        } else {
            Arc::new(LogSink)
        };
        let metrics = Arc::new(SearchMetrics::new());
        let resolver = NameResolver::new(api.clone()).with_metrics(metrics.clone());
        let limiter = config.max_concurrency.map(|n| Semaphore::new(n.max(1)));

        Self {
            api,
            resolver,
            sink,
            config,
            limiter,
            metrics,
        }
    }

    /// Replace the output sink
    pub fn with_sink(mut self, sink: Arc<dyn MatchSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Memoise user and channel lookups
    pub fn with_cache(mut self, cache: NameCache) -> Self {
        self.resolver = self.resolver.with_cache(cache);
        self
    }

    /// Open permalinks with `opener` when the config asks for the browser.
    ///
    /// Has no effect when matches are being logged.
    pub fn with_opener<O: PermalinkOpener + 'static>(mut self, opener: O) -> Self {
        if self.config.open_in_browser {
            self.sink = Arc::new(BrowserSink::new(opener));
        }
        self
    }

    /// Counters accumulated so far
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Run every flow the query's mode selects
    pub async fn run(&self, query: &SearchQuery) {
        if query.is_empty() {
            warn!("Skipping search with a blank query");
            return;
        }

        for &kind in query.mode.kinds() {
            self.search_kind(kind, &query.text).await;
        }
    }

    /// Probe page 1 for the page count, then search every page concurrently.
    ///
    /// Returns once all page tasks have finished, in page order.
    pub async fn search_kind(&self, kind: MatchKind, query: &str) -> Vec<PageOutcome> {
        let probe = match self.fetch_page(kind, query, 1).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(page = 1, query, error = %e, "Could not search Slack {}", kind);
                None
            }
        };
        let total_pages = probe.as_ref().map_or(0, |p| p.pages);
        debug!("Slack {} search '{}' reports {} pages", kind, query, total_pages);

        // Page 1 is fetched again below unless the probe is reused
        let mut first_page = if self.config.reuse_first_page {
            probe
        } else {
            None
        };

        let tasks: Vec<_> = (1..=total_pages)
            .map(|page| {
                let prefetched = if page == 1 { first_page.take() } else { None };
                self.search_page(kind, query, page, prefetched)
            })
            .collect();

        info!(
            "Searching {} pages of Slack {} for '{}'",
            tasks.len(),
            kind,
            query
        );

        // Wait for all pages to complete
        let outcomes = join_all(tasks).await;

        let failed_pages = outcomes.iter().filter(|o| o.failed).count();
        let matches: usize = outcomes.iter().map(|o| o.matches).sum();
        info!(
            query,
            pages = total_pages,
            failed_pages,
            matches,
            "Finished searching Slack {}",
            kind
        );

        outcomes
    }

    /// Fetch, resolve and emit a single page
    async fn search_page(
        &self,
        kind: MatchKind,
        query: &str,
        page: u32,
        prefetched: Option<PageResult>,
    ) -> PageOutcome {
        let _permit = match self.limiter {
            Some(ref limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        let result = match prefetched {
            Some(result) => result,
            None => match self.fetch_page(kind, query, page).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(page, query, error = %e, "Could not search Slack {}", kind);
                    return PageOutcome {
                        page,
                        matches: 0,
                        failed: true,
                    };
                }
            },
        };

        let count = result.matches.len();
        for m in result.matches {
            let resolved = self.resolver.resolve(m).await;
            self.sink.emit(page, &resolved);
            self.metrics.record_match();
        }

        debug!("Page {} of Slack {} returned {} matches", page, kind, count);

        PageOutcome {
            page,
            matches: count,
            failed: false,
        }
    }

    async fn fetch_page(
        &self,
        kind: MatchKind,
        query: &str,
        page: u32,
    ) -> Result<PageResult, SlackError> {
        self.metrics.record_page_fetch();

        let result = match kind {
            MatchKind::Files => self.api.search_files(query, page).await.map(|p| PageResult {
                pages: p.paging.pages,
                matches: p.matches.into_iter().map(Match::File).collect(),
            }),
            MatchKind::Messages => self
                .api
                .search_messages(query, page)
                .await
                .map(|p| PageResult {
                    pages: p.paging.pages,
                    matches: p.matches.into_iter().map(Match::Message).collect(),
                }),
        };

        if result.is_err() {
            self.metrics.record_page_failure();
        }
        result
    }
}

//! Caching module for slack-search
//!
//! Memoises user and channel display names so a search that returns many
//! files from the same owner or channel looks each ID up once.

use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Cache of resolved user and channel names, keyed by Slack ID
#[derive(Clone)]
pub struct NameCache {
    users: Cache<String, String>,
    channels: Cache<String, String>,
}

impl NameCache {
    /// Create a new name cache with the given TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            users: Self::build(ttl_seconds),
            channels: Self::build(ttl_seconds),
        }
    }

    fn build(ttl_seconds: u64) -> Cache<String, String> {
        Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(10_000)
            .build()
    }

    /// Cached user name, or the result of `fetch`.
    ///
    /// Concurrent callers for the same ID share one `fetch`. Errors are
    /// handed to every waiter and are not cached.
    pub async fn user_or_fetch<F, E>(&self, id: &str, fetch: F) -> Result<String, Arc<E>>
    where
        F: Future<Output = Result<String, E>>,
        E: Send + Sync + 'static,
    {
        self.users.try_get_with(id.to_string(), fetch).await
    }

    /// Cached channel name, or the result of `fetch`
    pub async fn channel_or_fetch<F, E>(&self, id: &str, fetch: F) -> Result<String, Arc<E>>
    where
        F: Future<Output = Result<String, E>>,
        E: Send + Sync + 'static,
    {
        self.channels.try_get_with(id.to_string(), fetch).await
    }
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new(300) // 5 minutes TTL
    }
}

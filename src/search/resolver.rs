//! User and channel name resolution

use crate::cache::NameCache;
use crate::metrics::SearchMetrics;
use crate::results::{Match, ResolvedFile, ResolvedMatch, ResolvedMessage};
use crate::slack::SlackApi;
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// Translates Slack user and channel IDs into display names.
///
/// A failed lookup never fails the match: the field becomes an empty string
/// and a warning is logged with the ID.
#[derive(Clone)]
pub struct NameResolver {
    api: Arc<dyn SlackApi>,
    cache: Option<NameCache>,
    metrics: Arc<SearchMetrics>,
}

impl NameResolver {
    pub fn new(api: Arc<dyn SlackApi>) -> Self {
        Self {
            api,
            cache: None,
            metrics: Arc::new(SearchMetrics::new()),
        }
    }

    pub fn with_cache(mut self, cache: NameCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<SearchMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Display name for `user_id`, or "" if it cannot be looked up
    pub async fn resolve_user(&self, user_id: &str) -> String {
        if user_id.is_empty() {
            return String::new();
        }

        let lookup = async {
            let result = self.api.user_info(user_id).await.map(|user| user.name);
            self.metrics.record_lookup(result.is_ok());
            result
        };
        let result = match self.cache {
            Some(ref cache) => cache.user_or_fetch(user_id, lookup).await,
            None => lookup.await.map_err(Arc::new),
        };

        result.unwrap_or_else(|e| {
            warn!(user = user_id, error = %e, "Could not search User {}", user_id);
            String::new()
        })
    }

    /// Display name for `channel_id`, or "" if it cannot be looked up
    pub async fn resolve_channel(&self, channel_id: &str) -> String {
        let lookup = async {
            let result = self
                .api
                .channel_info(channel_id)
                .await
                .map(|channel| channel.name);
            self.metrics.record_lookup(result.is_ok());
            result
        };
        let result = match self.cache {
            Some(ref cache) => cache.channel_or_fetch(channel_id, lookup).await,
            None => lookup.await.map_err(Arc::new),
        };

        result.unwrap_or_else(|e| {
            warn!(channel = channel_id, error = %e, "Could not search Channel {}", channel_id);
            String::new()
        })
    }

    /// Comma-joined channel names in input order, one "" per failed lookup
    pub async fn resolve_channels(&self, channel_ids: &[String]) -> String {
        let names = join_all(channel_ids.iter().map(|id| self.resolve_channel(id))).await;
        names.join(",")
    }

    /// Resolve every ID a match carries
    pub async fn resolve(&self, m: Match) -> ResolvedMatch {
        match m {
            Match::File(f) => {
                let (user, channels) = futures::join!(
                    self.resolve_user(&f.user_id),
                    self.resolve_channels(&f.channel_ids)
                );
                ResolvedMatch::File(ResolvedFile {
                    title: f.title,
                    url: f.url,
                    permalink: f.permalink,
                    user,
                    channels,
                })
            }
            Match::Message(msg) => {
                // search.messages usually carries names already
                let username = if msg.username.is_empty() {
                    self.resolve_user(&msg.user_id).await
                } else {
                    msg.username
                };
                let channel = if msg.channel.name.is_empty() && !msg.channel.id.is_empty() {
                    self.resolve_channel(&msg.channel.id).await
                } else {
                    msg.channel.name
                };
                ResolvedMatch::Message(ResolvedMessage {
                    text: msg.text,
                    permalink: msg.permalink,
                    username,
                    channel,
                })
            }
        }
    }
}

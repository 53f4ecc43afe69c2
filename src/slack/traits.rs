//! The Slack API surface the search orchestrator depends on

use super::error::SlackError;
use super::models::{Channel, FileMatch, MessageMatch, SearchPage, User};
use async_trait::async_trait;

/// Operations used by a search run.
///
/// `SlackClient` talks to the real Web API; tests substitute in-memory fakes.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Search files, returning one page of matches
    async fn search_files(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchPage<FileMatch>, SlackError>;

    /// Search messages, returning one page of matches
    async fn search_messages(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchPage<MessageMatch>, SlackError>;

    /// Look up a user by ID
    async fn user_info(&self, user_id: &str) -> Result<User, SlackError>;

    /// Look up a channel by ID
    async fn channel_info(&self, channel_id: &str) -> Result<Channel, SlackError>;
}

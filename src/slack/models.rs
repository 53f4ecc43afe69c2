//! Wire models for the Slack Web API responses we consume

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to every search response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Paging {
    /// Matches per page
    pub count: u32,
    /// Total matches across all pages
    pub total: u32,
    /// Current page (1-indexed)
    pub page: u32,
    /// Total number of pages
    pub pages: u32,
}

/// One page of search matches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPage<T> {
    pub matches: Vec<T>,
    pub paging: Paging,
}

impl<T> Default for SearchPage<T> {
    fn default() -> Self {
        Self {
            matches: Vec::new(),
            paging: Paging::default(),
        }
    }
}

impl<T> SearchPage<T> {
    pub fn new(matches: Vec<T>, pages: u32) -> Self {
        Self {
            matches,
            paging: Paging {
                pages,
                ..Default::default()
            },
        }
    }
}

/// A file returned by `search.files`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileMatch {
    pub id: String,
    pub title: String,
    /// Authenticated download URL
    #[serde(rename = "url_private")]
    pub url: String,
    pub permalink: String,
    /// Owner user ID
    #[serde(rename = "user")]
    pub user_id: String,
    /// IDs of the public channels the file was shared in
    #[serde(rename = "channels")]
    pub channel_ids: Vec<String>,
}

/// Channel reference embedded in a message match
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChannelRef {
    pub id: String,
    pub name: String,
}

/// A message returned by `search.messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MessageMatch {
    pub text: String,
    pub permalink: String,
    pub username: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub channel: ChannelRef,
}

/// Subset of `users.info`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Subset of `conversations.info`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

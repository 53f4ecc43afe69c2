//! slack-search: search Slack files and messages from the terminal
//!
//! Paginates Slack's search API concurrently, resolves user and channel
//! names for every match, and logs the results or opens them in a browser.

pub mod cache;
pub mod cli;
pub mod config;
pub mod metrics;
pub mod network;
pub mod results;
pub mod search;
pub mod slack;

pub use config::Settings;
pub use results::{Match, MatchKind, ResolvedMatch};
pub use search::{Search, SearchConfig, SearchMode, SearchQuery};
pub use slack::{SlackApi, SlackClient, SlackError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

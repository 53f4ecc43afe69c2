//! Slack Web API module
//!
//! Defines the `SlackApi` trait the search orchestrator depends on,
//! the HTTP-backed `SlackClient`, and the response models.

mod client;
mod error;
mod models;
mod traits;

pub use client::SlackClient;
pub use error::SlackError;
pub use models::*;
pub use traits::SlackApi;

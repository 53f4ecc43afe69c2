//! HTTP networking module
//!
//! Provides the HTTP client used to call the Slack Web API.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{ApiRequest, ApiResponse};

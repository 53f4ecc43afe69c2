//! Slack Web API client
//!
//! Calls `search.files`, `search.messages`, `users.info` and
//! `conversations.info` with a bearer token and unwraps Slack's
//! `{"ok": ..., "error": ...}` envelope.

use super::error::SlackError;
use super::models::{Channel, FileMatch, MessageMatch, SearchPage, User};
use super::traits::SlackApi;
use crate::config::SlackSettings;
use crate::network::{ApiRequest, HttpClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// `SlackApi` implementation backed by `HttpClient`
#[derive(Clone)]
pub struct SlackClient {
    http: HttpClient,
    api_url: String,
    token: String,
    page_size: u32,
}

impl SlackClient {
    /// Create a client from the `slack` settings section
    pub fn new(http: HttpClient, settings: &SlackSettings) -> Self {
        Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            page_size: settings.page_size,
        }
    }

    /// Full URL of a Web API method
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url, method)
    }

    /// Call a method and deserialize the `key` member of a successful envelope
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
        key: &str,
    ) -> Result<T, SlackError> {
        let mut request = ApiRequest::get(self.method_url(method)).bearer_auth(&self.token);
        for (name, value) in params {
            request = request.param(*name, value.clone());
        }

        let response = self.http.execute(request).await?;
        debug!("{} returned HTTP {}", method, response.status);

        if !response.is_success() {
            return Err(SlackError::Status(response.status));
        }

        let envelope: Value = response.json()?;
        unwrap_envelope(envelope, key)
    }

    async fn search<T: DeserializeOwned>(
        &self,
        method: &str,
        key: &str,
        query: &str,
        page: u32,
    ) -> Result<SearchPage<T>, SlackError> {
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("count", self.page_size.to_string()),
        ];
        self.call(method, &params, key).await
    }
}

/// Check `ok` and extract `key` from a Slack response envelope
fn unwrap_envelope<T: DeserializeOwned>(mut envelope: Value, key: &str) -> Result<T, SlackError> {
    let ok = envelope.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if !ok {
        let code = envelope
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error");
        return Err(SlackError::Api(code.to_string()));
    }

    match envelope.get_mut(key) {
        Some(body) => Ok(serde_json::from_value(body.take())?),
        None => Err(SlackError::Api(format!("missing `{}` in response", key))),
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn search_files(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchPage<FileMatch>, SlackError> {
        self.search("search.files", "files", query, page).await
    }

    async fn search_messages(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchPage<MessageMatch>, SlackError> {
        self.search("search.messages", "messages", query, page).await
    }

    async fn user_info(&self, user_id: &str) -> Result<User, SlackError> {
        self.call("users.info", &[("user", user_id.to_string())], "user")
            .await
    }

    async fn channel_info(&self, channel_id: &str) -> Result<Channel, SlackError> {
        self.call(
            "conversations.info",
            &[("channel", channel_id.to_string())],
            "channel",
        )
        .await
    }
}

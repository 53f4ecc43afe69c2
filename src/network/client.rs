//! HTTP client for making requests to the Slack Web API

use super::request::{ApiRequest, ApiResponse};
use crate::config::OutgoingSettings;
use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper configured from `OutgoingSettings`
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout).map_err(|_| {
            anyhow!(
                "Invalid outgoing.request_timeout: {}",
                settings.request_timeout
            )
        })?;

        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent);

        Ok(Self {
            client,
            default_timeout: timeout,
            user_agent,
        })
    }

    /// Execute a request with the default timeout
    pub async fn execute(&self, request: ApiRequest) -> reqwest::Result<ApiResponse> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute a request with a custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: ApiRequest,
        timeout: Duration,
    ) -> reqwest::Result<ApiResponse> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");

        if let Some(ref token) = request.bearer {
            req_builder = req_builder.bearer_auth(token);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: Response) -> reqwest::Result<ApiResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ApiResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn default_user_agent() -> String {
    format!("slack-search/{}", crate::VERSION)
}

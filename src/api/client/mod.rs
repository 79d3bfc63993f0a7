//! Backend client for the portfolio HUD endpoints.
//!
//! One `reqwest::Client` with a per-request timeout serves every
//! request/response endpoint. The telemetry push channel uses its own client
//! (see `telemetry::channel`) because a streaming body must not be bounded by
//! a total timeout.

mod transport;

use super::types::{AskRequest, AskResponse, PingResponse, Profile};
use super::{AnswerService, LatencyProbe, ProfileProvider};
use crate::config::ApiConfig;
use crate::error::ApiError;
use async_trait::async_trait;

/// Client for `/api/ask`, `/api/ping` and `/api/profile`.
#[derive(Debug, Clone)]
pub struct HudClient {
    http: reqwest::Client,
    base_url: String,
}

impl HudClient {
    /// Build a client from resolved API configuration.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: transport::build_http_client(config.timeout()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Ask the answer service; empty answers come back as `…`.
    pub async fn ask(&self, query: &str) -> Result<String, ApiError> {
        let response: AskResponse =
            transport::post_json(&self.http, &self.url("/api/ask"), &AskRequest { q: query })
                .await?;
        Ok(response.into_answer())
    }

    /// Round-trip the latency probe and return the server time.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let response: PingResponse = transport::get_json(&self.http, &self.url("/api/ping")).await?;
        Ok(response.now)
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        transport::get_json(&self.http, &self.url("/api/profile")).await
    }
}

#[async_trait]
impl AnswerService for HudClient {
    async fn ask(&self, query: &str) -> Result<String, ApiError> {
        HudClient::ask(self, query).await
    }
}

#[async_trait]
impl LatencyProbe for HudClient {
    async fn ping(&self) -> Result<String, ApiError> {
        HudClient::ping(self).await
    }
}

#[async_trait]
impl ProfileProvider for HudClient {
    async fn profile(&self) -> Result<Profile, ApiError> {
        HudClient::profile(self).await
    }
}

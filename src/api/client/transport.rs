//! HTTP transport helpers shared by the backend endpoints.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Build an HTTP client with timeout applied.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

pub(super) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<T, ApiError> {
    let response = http.get(url).send().await?;
    decode(response).await
}

pub(super) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = http.post(url).json(body).send().await?;
    decode(response).await
}

/// Map non-2xx statuses to [`ApiError::Status`] and decode the JSON body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            code: status.as_u16(),
            body: text.trim().to_string(),
        });
    }
    serde_json::from_str(&text).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

//! Push-channel subscription.
//!
//! A subscription is a stream of raw event payloads. Dropping the stream
//! closes the underlying connection.

use super::sse::SseDecoder;
use crate::error::TelemetryError;
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::time::Duration;

/// Raw event payloads of one open subscription. The stream ends when the
/// publisher closes the link.
pub type MessageStream = BoxStream<'static, Result<String, TelemetryError>>;

/// Source of telemetry subscriptions.
#[async_trait]
pub trait TelemetryChannel: Send + Sync {
    /// Open a brand new subscription.
    async fn subscribe(&self) -> Result<MessageStream, TelemetryError>;
}

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `text/event-stream` subscription over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTelemetryChannel {
    http: reqwest::Client,
    url: String,
}

impl HttpTelemetryChannel {
    pub fn new(base_url: &str, path: &str) -> Self {
        // A streaming body must not be bounded by a total request timeout.
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            url: format!("{}{path}", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TelemetryChannel for HttpTelemetryChannel {
    async fn subscribe(&self) -> Result<MessageStream, TelemetryError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::Status(status.as_u16()));
        }

        let state = (response.bytes_stream().boxed(), SseDecoder::new(), VecDeque::new());
        let payloads = stream::unfold(Some(state), |state| async move {
            let (mut bytes, mut decoder, mut pending) = state?;
            loop {
                if let Some(payload) = pending.pop_front() {
                    return Some((Ok(payload), Some((bytes, decoder, pending))));
                }
                match bytes.next().await {
                    Some(Ok(chunk)) => pending.extend(decoder.push(&chunk)),
                    Some(Err(err)) => return Some((Err(TelemetryError::from(err)), None)),
                    None => return None,
                }
            }
        });
        Ok(payloads.boxed())
    }
}

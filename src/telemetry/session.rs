//! Telemetry session: one live subscription with automatic recovery.
//!
//! `Connecting → Open → Lost → Connecting → …` until teardown moves the
//! session to `Closed`. Every loss waits the same fixed delay before a new
//! subscription is opened; there is no retry limit and no backoff growth.

use super::channel::{MessageStream, TelemetryChannel};
use super::sample::TelemetrySample;
use crate::config::TelemetryConfig;
use crate::error::TelemetryError;
use crate::ui::render::{RenderSink, TelemetryCard};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Link state observed by the status row and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Lost,
    Closed,
}

/// Delay applied before every reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::from(&TelemetryConfig::default())
    }
}

impl From<&TelemetryConfig> for ReconnectPolicy {
    fn from(config: &TelemetryConfig) -> Self {
        Self {
            delay: config.reconnect_delay(),
        }
    }
}

/// Source of the reconnect wait, injectable so tests control time.
#[async_trait]
pub trait ReconnectTimer: Send + Sync {
    async fn wait(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

#[async_trait]
impl ReconnectTimer for TokioTimer {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

pub struct TelemetrySession {
    channel: Arc<dyn TelemetryChannel>,
    sink: Arc<dyn RenderSink>,
    policy: ReconnectPolicy,
    timer: Arc<dyn ReconnectTimer>,
    state: watch::Sender<ConnectionState>,
}

/// Running session. Dropping the handle also tears the session down, but
/// without waiting for it.
pub struct TelemetryHandle {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<ConnectionState>,
    task: JoinHandle<()>,
}

impl TelemetryHandle {
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Receiver for link state changes.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Tear the session down and wait for it to drop its subscription.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "telemetry task ended abnormally");
        }
    }
}

enum Outcome {
    Lost(TelemetryError),
    Shutdown,
}

impl TelemetrySession {
    pub fn new(
        channel: Arc<dyn TelemetryChannel>,
        sink: Arc<dyn RenderSink>,
        policy: ReconnectPolicy,
        timer: Arc<dyn ReconnectTimer>,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Connecting);
        Self {
            channel,
            sink,
            policy,
            timer,
            state,
        }
    }

    /// Start the connect loop on the current runtime.
    pub fn spawn(self) -> TelemetryHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = self.state.subscribe();
        let task = tokio::spawn(self.run(shutdown_rx));
        TelemetryHandle {
            shutdown: shutdown_tx,
            state,
            task,
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }
            self.set_state(ConnectionState::Connecting);
            let subscribed = tokio::select! {
                _ = shutdown.changed() => break,
                result = self.channel.subscribe() => result,
            };
            let outcome = match subscribed {
                Ok(stream) => self.pump(stream, &mut shutdown).await,
                Err(err) => Outcome::Lost(err),
            };
            match outcome {
                Outcome::Shutdown => break,
                Outcome::Lost(err) => {
                    tracing::warn!(
                        error = %err,
                        delay_ms = self.policy.delay.as_millis() as u64,
                        "telemetry link lost"
                    );
                    self.set_state(ConnectionState::Lost);
                    self.sink.telemetry(&TelemetryCard::Lost);
                }
            }
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = self.timer.wait(self.policy.delay) => {}
            }
        }
        self.set_state(ConnectionState::Closed);
    }

    /// Render samples until the subscription ends; the stream is dropped on
    /// return, before any reconnect is scheduled.
    async fn pump(
        &self,
        mut stream: MessageStream,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Outcome {
        self.set_state(ConnectionState::Open);
        self.sink.telemetry(&TelemetryCard::Blank);
        loop {
            let item = tokio::select! {
                _ = shutdown.changed() => return Outcome::Shutdown,
                item = stream.next() => item,
            };
            match item {
                Some(Ok(payload)) => match TelemetrySample::parse(&payload) {
                    Ok(sample) => self.sink.telemetry(&sample.to_card()),
                    Err(err) => {
                        tracing::debug!(
                            error = %err,
                            payload,
                            "skipping malformed telemetry message"
                        );
                    }
                },
                Some(Err(err)) => return Outcome::Lost(err),
                None => return Outcome::Lost(TelemetryError::Closed),
            }
        }
    }

    fn set_state(&self, next: ConnectionState) {
        tracing::debug!(state = ?next, "telemetry state");
        self.state.send_replace(next);
    }
}

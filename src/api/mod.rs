//! HTTP client for the portfolio backend.
//!
//! The traits here are the seams the interpreter and session depend on, so
//! tests can script answers and probes without network calls while the
//! production path uses [`HudClient`].

use crate::error::ApiError;
use async_trait::async_trait;

mod client;
mod types;

pub use client::HudClient;
pub use types::{Profile, ProfileLink, EMPTY_ANSWER_PLACEHOLDER};

/// Free-text question answering (`POST /api/ask`).
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, query: &str) -> Result<String, ApiError>;
}

/// Round-trip health check returning the server's current time.
#[async_trait]
pub trait LatencyProbe: Send + Sync {
    async fn ping(&self) -> Result<String, ApiError>;
}

/// Source of the profile record shown in the boot banner.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn profile(&self) -> Result<Profile, ApiError>;
}

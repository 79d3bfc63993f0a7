//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Loader and source-resolution
//! logic stays in `config::mod` so precedence behavior is centralized.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_PROMPT, DEFAULT_RECONNECT_DELAY_MS,
    DEFAULT_REVEAL_DELAY_MS, DEFAULT_TELEMETRY_PATH, DEFAULT_THEME,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub telemetry: TelemetryConfig,
    pub voice: VoiceConfig,
    pub preferences: PreferencesConfig,
}

/// Backend connection settings under `[api]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Request timeout for ask/ping/profile calls.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Terminal presentation settings under `[display]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub reveal_delay_ms: u64,
    pub prompt: String,
    /// Theme applied when no valid preference has been persisted yet.
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            prompt: DEFAULT_PROMPT.into(),
            theme: DEFAULT_THEME.into(),
        }
    }
}

impl DisplayConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Push-channel settings under `[telemetry]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub path: String,
    pub reconnect_delay_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_TELEMETRY_PATH.into(),
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
        }
    }
}

impl TelemetryConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

/// Host speech capabilities under `[voice]`.
///
/// Both entries are argv vectors; an empty vector disables the capability.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub recognizer: Vec<String>,
    pub announcer: Vec<String>,
}

/// Preference-file location under `[preferences]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Explicit preferences path; empty means the per-user default.
    pub path: String,
}

impl PreferencesConfig {
    pub fn explicit_path(&self) -> Option<PathBuf> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

/// Loaded config plus non-fatal notes for the user.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// Where the config came from, for the boot banner and logs.
    pub source: String,
    pub warnings: Vec<String>,
}

/// Outcome of `hud init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}

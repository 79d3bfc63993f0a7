//! Default configuration constants.
//!
//! Callers share these constants instead of duplicating literals.

/// Embedded default `hud.toml` template written by `hud init`.
pub(super) const DEFAULT_HUD_CONFIG_TEMPLATE: &str = include_str!("templates/hud.toml");
/// Default backend base URL (the portfolio server).
pub(super) const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
/// Default timeout for ask/ping/profile requests.
pub(super) const DEFAULT_API_TIMEOUT_SECS: u64 = 20;
/// Per-character delay used by the paced reveal.
pub(super) const DEFAULT_REVEAL_DELAY_MS: u64 = 12;
/// Prompt host label.
pub(super) const DEFAULT_PROMPT: &str = "core@hud";
/// Theme used when nothing valid is persisted.
pub(super) const DEFAULT_THEME: &str = "dark";
/// Telemetry push-channel path relative to the base URL.
pub(super) const DEFAULT_TELEMETRY_PATH: &str = "/sse";
/// Fixed delay before every telemetry reconnect attempt.
pub(super) const DEFAULT_RECONNECT_DELAY_MS: u64 = 1500;

//! Rendering contracts consumed by the command and telemetry layers.
//!
//! `RenderSink` is the presentation seam: the terminal renderer implements it
//! for real output and tests substitute a recording sink.

use crate::ui::theme::{Palette, ThemeName};
use std::time::Duration;

/// Stable handle of one transcript line.
pub type LineId = usize;

/// Leading marker drawn before a transcript line's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Echo of typed input (`»`).
    Typed,
    /// Echo of a voice transcript (`🎙`).
    Mic,
    /// Named speaker label such as `ai`.
    Label(String),
}

impl Marker {
    pub fn glyph(&self) -> &str {
        match self {
            Self::Typed => "»",
            Self::Mic => "🎙",
            Self::Label(label) => label,
        }
    }
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub marker: Option<Marker>,
    pub text: String,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            marker: None,
            text: text.into(),
        }
    }

    pub fn marked(marker: Marker, text: impl Into<String>) -> Self {
        Self {
            marker: Some(marker),
            text: text.into(),
        }
    }

    /// Unstyled rendering (`<marker> <text>`), used by logs and tests.
    pub fn to_plain(&self) -> String {
        match &self.marker {
            Some(marker) => format!("{} {}", marker.glyph(), self.text),
            None => self.text.clone(),
        }
    }
}

/// Content of the single replaceable telemetry card.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryCard {
    /// Link open, no sample received yet.
    Blank,
    /// Latest sample, already formatted.
    Sample { time: String, summary: String },
    /// Link lost; a reconnect is scheduled.
    Lost,
}

/// Placeholder shown while the telemetry link is down.
pub const TELEMETRY_LOST_TEXT: &str = "Telemetry link lost. Reconnecting…";

/// Injectable presentation interface.
///
/// Implementations must not call back into the output renderer; callbacks
/// arrive in transcript order.
pub trait RenderSink: Send + Sync {
    /// Draw the input prompt chrome (`core@hud:~$`).
    fn prompt(&self, host: &str);
    /// A new transcript line was appended.
    fn line_appended(&self, id: LineId, line: &Line);
    /// The content of an existing line grew (paced reveal tick).
    fn line_updated(&self, id: LineId, line: &Line);
    /// A paced reveal on `id` finished.
    fn line_settled(&self, _id: LineId) {}
    /// Show a transient notification that expires after `ttl`.
    fn toast(&self, message: &str, ttl: Duration);
    /// Replace the telemetry card.
    fn telemetry(&self, card: &TelemetryCard);
    /// Update the displayed round-trip latency metric.
    fn latency(&self, elapsed: Duration);
    /// Show the wall clock; called once a second while the HUD is up.
    fn clock(&self, now: &str);
    /// Propagate the active palette to live style state.
    fn palette(&self, theme: ThemeName, palette: &Palette);
    /// Register the content of a named page section (e.g. `brand`).
    fn define_section(&self, id: &str, lines: &[String]);
    /// Bring a named page section into view.
    fn reveal_section(&self, id: &str);
}

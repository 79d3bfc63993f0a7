//! Terminal presentation on stderr.
//!
//! Transcript lines scroll normally. The one in-flight paced reveal is drawn
//! in place on the bottom row; reveals that start while another is live are
//! printed whole once they settle. When stderr is a terminal, the telemetry
//! card, latency metric and toasts share a status row pinned to the top of
//! the viewport.

use crate::ui::render::{Line, LineId, Marker, RenderSink, TelemetryCard, TELEMETRY_LOST_TEXT};
use crate::ui::theme::{Palette, PaletteToken, ThemeName};
use crossterm::cursor::{MoveTo, RestorePosition, SavePosition};
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};

const CLEAR_LINE: &str = "\r\x1b[2K";
const TOAST_GLYPH: &str = "◇";

struct State {
    out: Box<dyn Write + Send>,
    palette: &'static Palette,
    live: Option<(LineId, Line)>,
    parked: HashMap<LineId, Line>,
    sections: BTreeMap<String, Vec<String>>,
    card: TelemetryCard,
    latency: Option<Duration>,
    clock: Option<String>,
    toasts: Vec<(String, Instant)>,
}

/// [`RenderSink`] that draws the HUD with crossterm.
pub struct TerminalRenderer {
    color: bool,
    status_row: bool,
    me: Weak<TerminalRenderer>,
    state: Mutex<State>,
}

impl TerminalRenderer {
    /// Renderer on stderr; the status row is only drawn on a real terminal.
    pub fn stderr(color: bool) -> Arc<Self> {
        let status_row = io::stderr().is_terminal();
        Self::with_writer(Box::new(io::stderr()), color, status_row)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, color: bool, status_row: bool) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            color,
            status_row,
            me: me.clone(),
            state: Mutex::new(State {
                out,
                palette: ThemeName::Dark.palette(),
                live: None,
                parked: HashMap::new(),
                sections: BTreeMap::new(),
                card: TelemetryCard::Blank,
                latency: None,
                clock: None,
                toasts: Vec::new(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn paint(&self, palette: &Palette, token: PaletteToken, text: &str) -> String {
        if self.color {
            text.with(palette.color(token)).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_line(&self, palette: &Palette, line: &Line) -> String {
        let body_token = if line.text.starts_with('⚠') || line.text.starts_with('❌') {
            PaletteToken::Warning
        } else {
            PaletteToken::Text
        };
        let body = self.paint(palette, body_token, &line.text);
        match &line.marker {
            None => body,
            Some(marker) => {
                let token = match marker {
                    Marker::Label(_) => PaletteToken::Primary,
                    Marker::Typed | Marker::Mic => PaletteToken::Accent,
                };
                let glyph = self.paint(palette, token, marker.glyph());
                format!("{glyph} {body}")
            }
        }
    }

    /// Print complete rows above the live reveal, keeping it at the bottom.
    fn emit_rows(&self, state: &mut State, rows: &[String]) {
        let live = state
            .live
            .as_ref()
            .map(|(_, line)| self.format_line(state.palette, line));
        let mut text = String::new();
        if live.is_some() {
            text.push_str(CLEAR_LINE);
        }
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        if let Some(live) = live {
            text.push_str(&live);
        }
        write_all(&mut state.out, &text);
    }

    fn redraw_live(&self, state: &mut State) {
        let Some(text) = state
            .live
            .as_ref()
            .map(|(_, line)| format!("{CLEAR_LINE}{}", self.format_line(state.palette, line)))
        else {
            return;
        };
        write_all(&mut state.out, &text);
    }

    fn draw_status(&self, state: &mut State) {
        if !self.status_row {
            return;
        }
        let now = Instant::now();
        state.toasts.retain(|(_, expires)| *expires > now);
        let text = self.status_text(state);
        let out = &mut state.out;
        let result = out
            .queue(SavePosition)
            .and_then(|w| w.queue(MoveTo(0, 0)))
            .and_then(|w| w.queue(Clear(ClearType::CurrentLine)))
            .and_then(|w| w.queue(Print(&text)))
            .and_then(|w| w.queue(RestorePosition))
            .and_then(|w| w.flush());
        if let Err(err) = result {
            tracing::debug!(error = %err, "status row draw failed");
        }
    }

    fn status_text(&self, state: &State) -> String {
        let palette = state.palette;
        let mut parts = Vec::new();
        if let Some(clock) = &state.clock {
            parts.push(self.paint(palette, PaletteToken::Muted, clock));
        }
        match &state.card {
            TelemetryCard::Blank => {}
            TelemetryCard::Sample { time, summary } => {
                parts.push(format!(
                    "{} {}",
                    self.paint(palette, PaletteToken::Muted, time),
                    self.paint(palette, PaletteToken::Text, summary)
                ));
            }
            TelemetryCard::Lost => {
                parts.push(self.paint(palette, PaletteToken::Warning, TELEMETRY_LOST_TEXT));
            }
        }
        if let Some(latency) = state.latency {
            let metric = format!("latency {}", crate::command::format_millis(latency));
            parts.push(self.paint(palette, PaletteToken::Muted, &metric));
        }
        for (toast, _) in &state.toasts {
            let toast = format!("{TOAST_GLYPH} {toast}");
            parts.push(self.paint(palette, PaletteToken::Accent, &toast));
        }
        parts.join("  │  ")
    }

    fn expire_toasts(&self) {
        let mut state = self.lock();
        self.draw_status(&mut state);
    }
}

fn write_all(out: &mut Box<dyn Write + Send>, text: &str) {
    let result = out.write_all(text.as_bytes()).and_then(|_| out.flush());
    if let Err(err) = result {
        tracing::debug!(error = %err, "terminal write failed");
    }
}

fn is_reveal_start(line: &Line) -> bool {
    matches!(line.marker, Some(Marker::Label(_))) && line.text.is_empty()
}

impl RenderSink for TerminalRenderer {
    fn prompt(&self, host: &str) {
        let mut state = self.lock();
        let palette = state.palette;
        let row = format!(
            "{}{}",
            self.paint(palette, PaletteToken::Primary, host),
            self.paint(palette, PaletteToken::Muted, ":~$")
        );
        self.emit_rows(&mut state, &[row]);
    }

    fn line_appended(&self, id: LineId, line: &Line) {
        let mut state = self.lock();
        if is_reveal_start(line) {
            if state.live.is_none() {
                state.live = Some((id, line.clone()));
                self.redraw_live(&mut state);
            } else {
                state.parked.insert(id, line.clone());
            }
            return;
        }
        let row = self.format_line(state.palette, line);
        self.emit_rows(&mut state, &[row]);
    }

    fn line_updated(&self, id: LineId, line: &Line) {
        let mut state = self.lock();
        if state.live.as_ref().is_some_and(|(live_id, _)| *live_id == id) {
            state.live = Some((id, line.clone()));
            self.redraw_live(&mut state);
        } else {
            state.parked.insert(id, line.clone());
        }
    }

    fn line_settled(&self, id: LineId) {
        let mut state = self.lock();
        if state.live.as_ref().is_some_and(|(live_id, _)| *live_id == id) {
            state.live = None;
            write_all(&mut state.out, "\n");
            return;
        }
        if let Some(line) = state.parked.remove(&id) {
            let row = self.format_line(state.palette, &line);
            self.emit_rows(&mut state, &[row]);
        }
    }

    fn toast(&self, message: &str, ttl: Duration) {
        let mut state = self.lock();
        if !self.status_row {
            let palette = state.palette;
            let notice = format!("{TOAST_GLYPH} {message}");
            let row = self.paint(palette, PaletteToken::Accent, &notice);
            self.emit_rows(&mut state, &[row]);
            return;
        }
        state.toasts.push((message.to_string(), Instant::now() + ttl));
        self.draw_status(&mut state);
        drop(state);

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let me = self.me.clone();
            runtime.spawn(async move {
                tokio::time::sleep(ttl).await;
                if let Some(renderer) = me.upgrade() {
                    renderer.expire_toasts();
                }
            });
        }
    }

    fn telemetry(&self, card: &TelemetryCard) {
        let mut state = self.lock();
        state.card = card.clone();
        self.draw_status(&mut state);
    }

    fn latency(&self, elapsed: Duration) {
        let mut state = self.lock();
        state.latency = Some(elapsed);
        self.draw_status(&mut state);
    }

    fn clock(&self, now: &str) {
        if !self.status_row {
            return;
        }
        let mut state = self.lock();
        state.clock = Some(now.to_string());
        self.draw_status(&mut state);
    }

    fn palette(&self, theme: ThemeName, palette: &Palette) {
        tracing::debug!(
            theme = %theme,
            tokens = ?palette.entries().collect::<Vec<_>>(),
            "palette applied"
        );
        let mut state = self.lock();
        state.palette = theme.palette();
        self.redraw_live(&mut state);
        self.draw_status(&mut state);
    }

    fn define_section(&self, id: &str, lines: &[String]) {
        self.lock().sections.insert(id.to_string(), lines.to_vec());
    }

    fn reveal_section(&self, id: &str) {
        let mut state = self.lock();
        let Some(lines) = state.sections.get(id).cloned() else {
            tracing::debug!(section = id, "reveal requested for unknown section");
            return;
        };
        let palette = state.palette;
        let mut rows = vec![self.paint(palette, PaletteToken::Grid, &format!("── {id} ──"))];
        rows.extend(
            lines
                .iter()
                .map(|line| self.paint(palette, PaletteToken::Primary, line)),
        );
        self.emit_rows(&mut state, &rows);
    }
}

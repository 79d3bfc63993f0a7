//! Append-only transcript with instantaneous and paced writes.
//!
//! Every write goes through the transcript lock and is forwarded to the
//! [`RenderSink`] while that lock is held, so sink callbacks always arrive in
//! transcript order. The lock is released before any await.

use crate::ui::render::{Line, LineId, Marker, RenderSink};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_millis(4000);

/// Cheaply cloneable handle to the shared transcript.
#[derive(Clone)]
pub struct OutputRenderer {
    inner: Arc<Inner>,
}

struct Inner {
    sink: Arc<dyn RenderSink>,
    transcript: Mutex<Vec<Line>>,
}

impl OutputRenderer {
    pub fn new(sink: Arc<dyn RenderSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink,
                transcript: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Presentation layer this renderer writes to.
    pub fn sink(&self) -> &Arc<dyn RenderSink> {
        &self.inner.sink
    }

    /// Append a complete line immediately.
    pub fn append_line(&self, line: Line) -> LineId {
        let mut transcript = self.transcript();
        let id = transcript.len();
        self.inner.sink.line_appended(id, &line);
        transcript.push(line);
        id
    }

    /// Append an unmarked line.
    pub fn println(&self, text: impl Into<String>) -> LineId {
        self.append_line(Line::plain(text))
    }

    /// Raise a transient notification; toasts never enter the transcript.
    pub fn toast(&self, message: &str) {
        self.inner.sink.toast(message, TOAST_TTL);
    }

    /// Reveal `text` one character per `delay` on a fresh line labelled
    /// `prefix`.
    ///
    /// Every intermediate state from zero characters to the full text is
    /// emitted exactly once and in order. Resolves once the full text is
    /// shown.
    pub async fn paced_reveal(&self, prefix: &str, text: &str, delay: Duration) -> LineId {
        let id = self.append_line(Line::marked(Marker::Label(prefix.to_string()), ""));
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .skip(1)
            .chain(std::iter::once(text.len()))
            .collect();
        let states = std::iter::once(0).chain(boundaries.into_iter().filter(|_| !text.is_empty()));

        for end in states {
            tokio::time::sleep(delay).await;
            let mut transcript = self.transcript();
            if let Some(line) = transcript.get_mut(id) {
                line.text = text[..end].to_string();
                self.inner.sink.line_updated(id, line);
            }
        }
        self.inner.sink.line_settled(id);
        id
    }

    /// Snapshot of the transcript in append order.
    pub fn snapshot(&self) -> Vec<Line> {
        self.transcript().clone()
    }

    fn transcript(&self) -> MutexGuard<'_, Vec<Line>> {
        self.inner
            .transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{RecordingSink, SinkEvent};
    use tokio::time::Instant;

    fn renderer() -> (OutputRenderer, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (OutputRenderer::new(sink.clone()), sink)
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_emits_every_prefix_in_order() {
        let (out, sink) = renderer();
        let started = Instant::now();
        let id = out.paced_reveal("ai", "ok", Duration::from_millis(12)).await;

        assert_eq!(sink.updates_for(id), vec!["", "o", "ok"]);
        assert!(started.elapsed() >= Duration::from_millis(36));
        assert_eq!(out.snapshot()[id].to_plain(), "ai ok");
        assert_eq!(sink.events().last(), Some(&SinkEvent::Settled(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_of_empty_text_emits_single_state() {
        let (out, sink) = renderer();
        let id = out.paced_reveal("ai", "", Duration::from_millis(12)).await;
        assert_eq!(sink.updates_for(id), vec![""]);
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_counts_characters_not_bytes() {
        let (out, sink) = renderer();
        let id = out.paced_reveal("ai", "⚠️ x", Duration::from_millis(1)).await;
        let states = sink.updates_for(id);
        assert_eq!(states.len(), "⚠️ x".chars().count() + 1);
        assert_eq!(states.last().map(String::as_str), Some("⚠️ x"));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_reveals_own_their_lines() {
        let (out, sink) = renderer();
        let a = out.clone();
        let b = out.clone();
        let (first, second) = tokio::join!(
            a.paced_reveal("ai", "abc", Duration::from_millis(12)),
            b.paced_reveal("ai", "xy", Duration::from_millis(5)),
        );
        assert_ne!(first, second);
        assert_eq!(sink.updates_for(first), vec!["", "a", "ab", "abc"]);
        assert_eq!(sink.updates_for(second), vec!["", "x", "xy"]);
    }

    #[test]
    fn transcript_is_append_only_and_toasts_are_separate() {
        let (out, sink) = renderer();
        assert_eq!(out.println("one"), 0);
        out.toast("About opened");
        assert_eq!(out.println("two"), 1);

        let lines: Vec<_> = out.snapshot().iter().map(Line::to_plain).collect();
        assert_eq!(lines, vec!["one", "two"]);
        assert_eq!(sink.toasts(), vec![("About opened".to_string(), TOAST_TTL)]);
    }
}

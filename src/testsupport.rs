//! Shared test fixtures: temp dirs plus scripted/recording stand-ins for every
//! collaborator seam (render sink, backend, announcer, recognizer, telemetry
//! channel, reconnect timer).

use crate::api::{AnswerService, LatencyProbe, Profile, ProfileProvider};
use crate::audio::Announcer;
use crate::error::{ApiError, TelemetryError, VoiceError};
use crate::telemetry::{MessageStream, ReconnectTimer, TelemetryChannel};
use crate::ui::render::{Line, LineId, RenderSink, TelemetryCard};
use crate::ui::theme::{Palette, ThemeName};
use crate::voice::SpeechRecognizer;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{mpsc, oneshot};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("hud-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// ---------------------------------------------------------------------------
// Render sink
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Prompt(String),
    Appended(LineId, String),
    Updated(LineId, String),
    Settled(LineId),
    Toast(String, Duration),
    Telemetry(TelemetryCard),
    Latency(Duration),
    Clock(String),
    Palette(ThemeName),
    DefineSection(String, Vec<String>),
    RevealSection(String),
}

/// Render sink that records every callback in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    fn record(&self, event: SinkEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn palettes(&self) -> Vec<ThemeName> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Palette(theme) => Some(theme),
                _ => None,
            })
            .collect()
    }

    /// Every revealed state of line `id`, in emission order.
    pub fn updates_for(&self, id: LineId) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Updated(line, text) if line == id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn toasts(&self) -> Vec<(String, Duration)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Toast(msg, ttl) => Some((msg, ttl)),
                _ => None,
            })
            .collect()
    }

    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|(msg, _)| msg).collect()
    }

    pub fn telemetry_cards(&self) -> Vec<TelemetryCard> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Telemetry(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    pub fn latencies(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Latency(elapsed) => Some(elapsed),
                _ => None,
            })
            .collect()
    }

    pub fn clock_ticks(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Clock(now) => Some(now),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn prompt(&self, host: &str) {
        self.record(SinkEvent::Prompt(host.to_string()));
    }

    fn line_appended(&self, id: LineId, line: &Line) {
        self.record(SinkEvent::Appended(id, line.to_plain()));
    }

    fn line_updated(&self, id: LineId, line: &Line) {
        self.record(SinkEvent::Updated(id, line.text.clone()));
    }

    fn line_settled(&self, id: LineId) {
        self.record(SinkEvent::Settled(id));
    }

    fn toast(&self, message: &str, ttl: Duration) {
        self.record(SinkEvent::Toast(message.to_string(), ttl));
    }

    fn telemetry(&self, card: &TelemetryCard) {
        self.record(SinkEvent::Telemetry(card.clone()));
    }

    fn latency(&self, elapsed: Duration) {
        self.record(SinkEvent::Latency(elapsed));
    }

    fn clock(&self, now: &str) {
        self.record(SinkEvent::Clock(now.to_string()));
    }

    fn palette(&self, theme: ThemeName, _palette: &Palette) {
        self.record(SinkEvent::Palette(theme));
    }

    fn define_section(&self, id: &str, lines: &[String]) {
        self.record(SinkEvent::DefineSection(id.to_string(), lines.to_vec()));
    }

    fn reveal_section(&self, id: &str) {
        self.record(SinkEvent::RevealSection(id.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

fn scripted_failure() -> ApiError {
    ApiError::Status {
        code: 503,
        body: "scripted failure".to_string(),
    }
}

/// Answer service returning a fixed answer (or failing), recording queries.
#[derive(Debug)]
pub struct ScriptedAnswers {
    answer: Option<String>,
    delay: Duration,
    queries: Mutex<Vec<String>>,
}

impl ScriptedAnswers {
    pub fn ok(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            delay: Duration::ZERO,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            delay: Duration::ZERO,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerService for ScriptedAnswers {
    async fn ask(&self, query: &str) -> Result<String, ApiError> {
        self.queries.lock().unwrap().push(query.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer.clone().ok_or_else(scripted_failure)
    }
}

/// Latency probe returning a fixed server time after an optional delay.
#[derive(Debug)]
pub struct ScriptedProbe {
    now: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn ok(now: &str) -> Self {
        Self {
            now: Some(now.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            now: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LatencyProbe for ScriptedProbe {
    async fn ping(&self) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.now.clone().ok_or_else(scripted_failure)
    }
}

/// Profile provider returning a fixed record (or failing).
#[derive(Debug)]
pub struct ScriptedProfile(pub Option<Profile>);

#[async_trait]
impl ProfileProvider for ScriptedProfile {
    async fn profile(&self) -> Result<Profile, ApiError> {
        self.0.clone().ok_or_else(scripted_failure)
    }
}

// ---------------------------------------------------------------------------
// Speech
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    spoken: Mutex<Vec<String>>,
}

impl RecordingAnnouncer {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

#[derive(Debug)]
pub struct ScriptedRecognizer(Result<String, VoiceError>);

impl ScriptedRecognizer {
    pub fn ok(transcript: &str) -> Self {
        Self(Ok(transcript.to_string()))
    }

    pub fn failing(code: &str) -> Self {
        Self(Err(VoiceError::Recognition {
            code: code.to_string(),
        }))
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self) -> Result<String, VoiceError> {
        self.0.clone()
    }
}

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

pub type WaitRequest = (Duration, oneshot::Sender<()>);

/// Reconnect timer that blocks until the test releases it.
///
/// Each `wait` call is reported as `(delay, release)`; dropping `release`
/// also ends the wait.
#[derive(Debug)]
pub struct ManualTimer {
    requests: mpsc::UnboundedSender<WaitRequest>,
}

impl ManualTimer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WaitRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Self { requests }, rx)
    }
}

#[async_trait]
impl ReconnectTimer for ManualTimer {
    async fn wait(&self, delay: Duration) {
        let (release, released) = oneshot::channel();
        if self.requests.send((delay, release)).is_err() {
            return;
        }
        let _ = released.await;
    }
}

pub type ScriptedFeed = mpsc::UnboundedSender<Result<String, TelemetryError>>;

/// Telemetry channel handing the test one feed per subscription.
///
/// Dropping a feed closes that subscription's stream.
#[derive(Debug)]
pub struct ScriptedChannel {
    feeds: mpsc::UnboundedSender<ScriptedFeed>,
    failures_left: AtomicUsize,
}

impl ScriptedChannel {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScriptedFeed>) {
        Self::failing_first(0)
    }

    /// Reject the first `failures` subscribe calls.
    pub fn failing_first(failures: usize) -> (Self, mpsc::UnboundedReceiver<ScriptedFeed>) {
        let (feeds, rx) = mpsc::unbounded_channel();
        (
            Self {
                feeds,
                failures_left: AtomicUsize::new(failures),
            },
            rx,
        )
    }
}

#[async_trait]
impl TelemetryChannel for ScriptedChannel {
    async fn subscribe(&self) -> Result<MessageStream, TelemetryError> {
        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(TelemetryError::Connect("scripted refusal".to_string()));
        }
        let (feed, mut messages) = mpsc::unbounded_channel();
        self.feeds
            .send(feed)
            .map_err(|_| TelemetryError::Connect("test dropped the feed receiver".to_string()))?;
        let stream = stream::poll_fn(move |cx| messages.poll_recv(cx));
        Ok(stream.boxed())
    }
}

//! Interactive HUD session: owns the theme machine, interpreter, voice
//! adapter and telemetry session, and runs each submitted command as its own
//! task.

use crate::api::{AnswerService, HudClient, LatencyProbe, ProfileProvider};
use crate::audio::{announcer_from_argv, Announcer};
use crate::command::{Catalog, CommandInterpreter, InterpreterParams, Origin, ABOUT_SECTION};
use crate::config::{Config, PreferenceStore};
use crate::telemetry::{
    HttpTelemetryChannel, ReconnectPolicy, TelemetryHandle, TelemetrySession, TokioTimer,
};
use crate::ui::output::OutputRenderer;
use crate::ui::render::RenderSink;
use crate::ui::theme::{ThemeMachine, ThemeName};
use crate::voice::{CommandRecognizer, SpeechRecognizer, VoiceInput};
use chrono::Local;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const CLOCK_TICK: Duration = Duration::from_secs(1);
const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a session is assembled from.
pub struct SessionParams {
    pub sink: Arc<dyn RenderSink>,
    pub prefs: Arc<dyn PreferenceStore>,
    pub answers: Arc<dyn AnswerService>,
    pub probe: Arc<dyn LatencyProbe>,
    pub profile: Arc<dyn ProfileProvider>,
    pub announcer: Arc<dyn Announcer>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
    /// Not yet started; `boot` spawns it.
    pub telemetry: Option<TelemetrySession>,
    pub catalog: Catalog,
    pub fallback_theme: ThemeName,
    pub reveal_delay: Duration,
    pub prompt: String,
}

pub struct HudSession {
    interpreter: Arc<CommandInterpreter>,
    theme: Arc<ThemeMachine>,
    voice: Arc<VoiceInput>,
    profile: Arc<dyn ProfileProvider>,
    probe: Arc<dyn LatencyProbe>,
    pending_telemetry: Mutex<Option<TelemetrySession>>,
    telemetry: Mutex<Option<TelemetryHandle>>,
    clock: Mutex<Option<JoinHandle<()>>>,
    prompt: String,
}

impl HudSession {
    pub fn new(params: SessionParams) -> Self {
        let theme = Arc::new(ThemeMachine::init(
            params.prefs,
            params.sink.clone(),
            params.fallback_theme,
        ));
        let interpreter = Arc::new(CommandInterpreter::new(InterpreterParams {
            output: OutputRenderer::new(params.sink),
            theme: theme.clone(),
            answers: params.answers,
            probe: params.probe.clone(),
            catalog: Arc::new(params.catalog),
            announcer: params.announcer.clone(),
            reveal_delay: params.reveal_delay,
        }));
        let voice = Arc::new(VoiceInput::new(params.recognizer, params.announcer));
        Self {
            interpreter,
            theme,
            voice,
            profile: params.profile,
            probe: params.probe,
            pending_telemetry: Mutex::new(params.telemetry),
            telemetry: Mutex::new(None),
            clock: Mutex::new(None),
            prompt: params.prompt,
        }
    }

    /// Assemble a session against the configured backend.
    pub fn from_config(
        config: &Config,
        sink: Arc<dyn RenderSink>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let client = Arc::new(HudClient::new(&config.api));
        let telemetry = config.telemetry.enabled.then(|| {
            TelemetrySession::new(
                Arc::new(HttpTelemetryChannel::new(
                    &config.api.base_url,
                    &config.telemetry.path,
                )),
                sink.clone(),
                ReconnectPolicy::from(&config.telemetry),
                Arc::new(TokioTimer),
            )
        });
        let recognizer = CommandRecognizer::new(&config.voice.recognizer)
            .map(|recognizer| Arc::new(recognizer) as Arc<dyn SpeechRecognizer>);
        let fallback_theme = ThemeName::parse(&config.display.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.display.theme, "unknown display.theme; using dark");
            ThemeName::Dark
        });

        Self::new(SessionParams {
            sink,
            prefs,
            answers: client.clone(),
            probe: client.clone(),
            profile: client,
            announcer: announcer_from_argv(&config.voice.announcer),
            recognizer,
            telemetry,
            catalog: Catalog::default(),
            fallback_theme,
            reveal_delay: config.display.reveal_delay(),
            prompt: config.display.prompt.clone(),
        })
    }

    pub fn output(&self) -> &OutputRenderer {
        self.interpreter.output()
    }

    pub fn active_theme(&self) -> ThemeName {
        self.theme.active()
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice.is_enabled()
    }

    /// Print the profile banner, start telemetry and the clock, fire the
    /// initial latency probe, and show the prompt.
    pub async fn boot(&self) -> JoinHandle<()> {
        let output = self.output();
        match self.profile.profile().await {
            Ok(profile) => {
                let lines = profile.banner_lines();
                for line in &lines {
                    output.println(line.clone());
                }
                output.sink().define_section(ABOUT_SECTION, &lines);
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile request failed");
                output.println(format!("⚠️ profile unavailable: {err}"));
            }
        }

        self.start_telemetry();
        self.start_clock();
        let probe_task = self.spawn_initial_probe();
        self.show_prompt();
        probe_task
    }

    fn start_telemetry(&self) {
        let pending = lock(&self.pending_telemetry).take();
        if let Some(session) = pending {
            tracing::info!("starting telemetry session");
            *lock(&self.telemetry) = Some(session.spawn());
        }
    }

    fn start_clock(&self) {
        let sink = self.output().sink().clone();
        let ticker = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(CLOCK_TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                sink.clock(&Local::now().format(CLOCK_FORMAT).to_string());
            }
        });
        if let Some(previous) = lock(&self.clock).replace(ticker) {
            previous.abort();
        }
    }

    /// Latency-only probe: updates the metric and writes no transcript line.
    fn spawn_initial_probe(&self) -> JoinHandle<()> {
        let probe = self.probe.clone();
        let sink = self.output().sink().clone();
        tokio::spawn(async move {
            let started = Instant::now();
            match probe.ping().await {
                Ok(_) => sink.latency(started.elapsed()),
                Err(err) => tracing::warn!(error = %err, "initial latency probe failed"),
            }
        })
    }

    pub fn show_prompt(&self) {
        self.output().sink().prompt(&self.prompt);
    }

    /// Run one typed command on its own task.
    pub fn submit(&self, raw: String) -> JoinHandle<()> {
        let interpreter = self.interpreter.clone();
        tokio::spawn(async move { interpreter.handle(&raw, Origin::Typed).await })
    }

    /// Next-theme control: advance the rotation and toast the result.
    pub fn next_theme(&self) -> ThemeName {
        let next = self.theme.cycle_next();
        self.output().toast(&format!("Theme → {next}"));
        next
    }

    /// Mic control: capture and dispatch one utterance on its own task.
    pub fn listen(&self) -> JoinHandle<()> {
        let voice = self.voice.clone();
        let interpreter = self.interpreter.clone();
        tokio::spawn(async move {
            if let Err(err) = voice.listen(&interpreter).await {
                tracing::debug!(error = %err, "voice capture ended without a command");
            }
        })
    }

    /// Stop the clock and tear down the telemetry session, if they were started.
    pub async fn shutdown(&self) {
        if let Some(ticker) = lock(&self.clock).take() {
            ticker.abort();
        }
        let handle = lock(&self.telemetry).take();
        if let Some(handle) = handle {
            handle.shutdown().await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Profile, ProfileLink};
    use crate::config::MemoryPreferences;
    use crate::testsupport::{
        ManualTimer, RecordingAnnouncer, RecordingSink, ScriptedAnswers, ScriptedChannel,
        ScriptedProbe, ScriptedProfile, ScriptedRecognizer, SinkEvent,
    };
    use crate::ui::render::Line;

    fn profile() -> Profile {
        Profile {
            name: "Ada".to_string(),
            role: "Engineer".to_string(),
            location: "London".to_string(),
            email: "ada@example.com".to_string(),
            links: vec![ProfileLink {
                label: "GitHub".to_string(),
                url: "https://github.com/ada".to_string(),
            }],
            skills: vec!["Go".to_string()],
        }
    }

    fn params(sink: Arc<RecordingSink>, answers: ScriptedAnswers) -> SessionParams {
        SessionParams {
            sink,
            prefs: Arc::new(MemoryPreferences::new(None)),
            answers: Arc::new(answers),
            probe: Arc::new(ScriptedProbe::ok("now")),
            profile: Arc::new(ScriptedProfile(Some(profile()))),
            announcer: Arc::new(RecordingAnnouncer::default()),
            recognizer: None,
            telemetry: None,
            catalog: Catalog::default(),
            fallback_theme: ThemeName::Dark,
            reveal_delay: Duration::from_millis(12),
            prompt: "core@hud".to_string(),
        }
    }

    fn lines(session: &HudSession) -> Vec<String> {
        session.output().snapshot().iter().map(Line::to_plain).collect()
    }

    #[tokio::test]
    async fn boot_prints_banner_registers_brand_and_probes_latency() {
        let sink = Arc::new(RecordingSink::default());
        let session = HudSession::new(params(sink.clone(), ScriptedAnswers::ok("x")));
        session.boot().await.await.unwrap();

        let transcript = lines(&session);
        assert_eq!(transcript[0], "Ada");
        assert!(transcript.contains(&"Contact: ada@example.com".to_string()));
        assert!(sink.events().iter().any(|e| matches!(
            e,
            SinkEvent::DefineSection(id, section) if id == "brand" && section[0] == "Ada"
        )));
        assert_eq!(sink.latencies().len(), 1);
        assert!(sink.events().contains(&SinkEvent::Prompt("core@hud".to_string())));
    }

    #[tokio::test]
    async fn boot_survives_profile_failure() {
        let sink = Arc::new(RecordingSink::default());
        let mut p = params(sink.clone(), ScriptedAnswers::ok("x"));
        p.profile = Arc::new(ScriptedProfile(None));
        let session = HudSession::new(p);
        session.boot().await.await.unwrap();
        assert!(lines(&session)[0].starts_with("⚠️ profile unavailable"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_query_does_not_block_later_commands() {
        let sink = Arc::new(RecordingSink::default());
        let session = HudSession::new(params(
            sink,
            ScriptedAnswers::ok("late").with_delay(Duration::from_secs(5)),
        ));

        let slow = session.submit("what do you build?".to_string());
        tokio::task::yield_now().await;
        session.submit("help".to_string()).await.unwrap();

        let transcript = lines(&session);
        assert!(transcript.contains(&crate::command::HELP_TEXT.to_string()));
        assert!(!transcript.iter().any(|line| line.starts_with("ai ")));

        slow.await.unwrap();
        assert_eq!(lines(&session).last().unwrap(), "ai late");
    }

    #[tokio::test]
    async fn next_theme_cycles_and_toasts() {
        let sink = Arc::new(RecordingSink::default());
        let session = HudSession::new(params(sink.clone(), ScriptedAnswers::ok("x")));
        assert_eq!(session.active_theme(), ThemeName::Dark);
        assert_eq!(session.next_theme(), ThemeName::Neon);
        assert_eq!(sink.toast_messages(), vec!["Theme → neon".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn listen_dispatches_voice_transcript() {
        let sink = Arc::new(RecordingSink::default());
        let mut p = params(sink, ScriptedAnswers::ok("x"));
        p.recognizer = Some(Arc::new(ScriptedRecognizer::ok("ping")));
        let session = HudSession::new(p);
        assert!(session.voice_enabled());

        session.listen().await.unwrap();
        let transcript = lines(&session);
        assert_eq!(transcript[0], "🎙 ping");
        assert_eq!(transcript[1], "pong now (0ms)");
    }

    #[tokio::test]
    async fn boot_starts_telemetry_and_shutdown_stops_it() {
        let sink = Arc::new(RecordingSink::default());
        let (channel, mut feeds) = ScriptedChannel::new();
        let (timer, _waits) = ManualTimer::new();
        let mut p = params(sink.clone(), ScriptedAnswers::ok("x"));
        p.telemetry = Some(TelemetrySession::new(
            Arc::new(channel),
            sink.clone(),
            ReconnectPolicy::default(),
            Arc::new(timer),
        ));
        let session = HudSession::new(p);
        let _probe = session.boot().await;

        let feed = feeds.recv().await.unwrap();
        session.shutdown().await;
        assert!(feed.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn clock_ticks_every_second_until_shutdown() {
        let sink = Arc::new(RecordingSink::default());
        let session = HudSession::new(params(sink.clone(), ScriptedAnswers::ok("x")));
        session.boot().await.await.unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let ticks = sink.clock_ticks();
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|now| now.len() == 19 && &now[4..5] == "-"));

        session.shutdown().await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(sink.clock_ticks().len(), 3);
    }
}

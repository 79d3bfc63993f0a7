//! Effects of each [`ParsedAction`].
//!
//! The interpreter never fails: outbound errors become transcript lines and
//! best-effort side channels only log.

use super::catalog::Catalog;
use super::parse::{interpret, ParsedAction};
use crate::api::{AnswerService, LatencyProbe};
use crate::audio::Announcer;
use crate::ui::output::OutputRenderer;
use crate::ui::render::{Line, Marker};
use crate::ui::theme::ThemeMachine;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const HELP_TEXT: &str = "commands: help, theme [neon|green|red|blue|dark], open about, list projects, about <project>, tech <name>, skill <name>, ping";

const ANSWER_PREFIX: &str = "ai";
const ANSWER_READY: &str = "Answer ready.";
const TECH_FAILURE: &str = "⚠️ Could not fetch details.";
const FREEFORM_FAILURE: &str = "Sorry — I hit an issue answering that.";
const PROJECT_NOT_FOUND: &str = "❌ Project not found.";
const ABOUT_OPENED: &str = "About opened";

/// Where a command came from; decides the echo marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Typed,
    Voice,
}

impl Origin {
    fn marker(self) -> Marker {
        match self {
            Self::Typed => Marker::Typed,
            Self::Voice => Marker::Mic,
        }
    }
}

/// Collaborators the interpreter dispatches to.
pub struct InterpreterParams {
    pub output: OutputRenderer,
    pub theme: Arc<ThemeMachine>,
    pub answers: Arc<dyn AnswerService>,
    pub probe: Arc<dyn LatencyProbe>,
    pub catalog: Arc<Catalog>,
    pub announcer: Arc<dyn Announcer>,
    pub reveal_delay: Duration,
}

pub struct CommandInterpreter {
    output: OutputRenderer,
    theme: Arc<ThemeMachine>,
    answers: Arc<dyn AnswerService>,
    probe: Arc<dyn LatencyProbe>,
    catalog: Arc<Catalog>,
    announcer: Arc<dyn Announcer>,
    reveal_delay: Duration,
}

impl CommandInterpreter {
    pub fn new(params: InterpreterParams) -> Self {
        Self {
            output: params.output,
            theme: params.theme,
            answers: params.answers,
            probe: params.probe,
            catalog: params.catalog,
            announcer: params.announcer,
            reveal_delay: params.reveal_delay,
        }
    }

    pub fn output(&self) -> &OutputRenderer {
        &self.output
    }

    /// Echo `raw` and run it. Blank input is ignored entirely.
    pub async fn handle(&self, raw: &str, origin: Origin) {
        if let Some(action) = self.echo(raw, origin) {
            self.execute(action).await;
        }
    }

    /// Parse `raw` and append its echo line; `None` (and no echo) for blank
    /// input.
    pub fn echo(&self, raw: &str, origin: Origin) -> Option<ParsedAction> {
        let action = interpret(raw)?;
        self.output
            .append_line(Line::marked(origin.marker(), raw.trim()));
        tracing::debug!(?action, ?origin, "dispatching command");
        Some(action)
    }

    /// Apply one action's effects, resolving once all of its output is shown.
    pub async fn execute(&self, action: ParsedAction) {
        match action {
            ParsedAction::Help => {
                self.output.println(HELP_TEXT);
            }
            ParsedAction::ListProjects => {
                for project in self.catalog.projects() {
                    self.output
                        .println(format!("◆ {} — {}", project.name, project.stack));
                }
            }
            ParsedAction::AboutProject(query) => self.about_project(&query),
            ParsedAction::TechQuery(term) => {
                self.output
                    .println(format!("🔎 Fetching info about {term}..."));
                self.ask_and_reveal(&term, TECH_FAILURE).await;
            }
            ParsedAction::SetTheme(name) => {
                self.theme.apply(&name);
                self.output.println(format!("theme set → {name}"));
            }
            ParsedAction::OpenSection(id) => {
                self.output.sink().reveal_section(&id);
                self.output.toast(ABOUT_OPENED);
            }
            ParsedAction::Ping => self.ping().await,
            ParsedAction::FreeformQuery(text) => {
                self.ask_and_reveal(&text, FREEFORM_FAILURE).await;
            }
        }
    }

    fn about_project(&self, query: &str) {
        match self.catalog.find(query) {
            Some(project) => {
                self.output.println(format!("📌 {}", project.name));
                self.output.println(format!("Stack: {}", project.stack));
                self.output.println(format!("Desc: {}", project.desc));
                self.output.println(format!("Repo: {}", project.repo));
            }
            None => {
                self.output.println(PROJECT_NOT_FOUND);
            }
        }
    }

    async fn ask_and_reveal(&self, query: &str, failure_text: &str) {
        match self.answers.ask(query).await {
            Ok(answer) => {
                self.output
                    .paced_reveal(ANSWER_PREFIX, &answer, self.reveal_delay)
                    .await;
                self.announcer.announce(ANSWER_READY);
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "answer service request failed");
                self.output
                    .paced_reveal(ANSWER_PREFIX, failure_text, self.reveal_delay)
                    .await;
            }
        }
    }

    async fn ping(&self) {
        let started = Instant::now();
        match self.probe.ping().await {
            Ok(server_time) => {
                let elapsed = started.elapsed();
                self.output.sink().latency(elapsed);
                self.output
                    .println(format!("pong {server_time} ({})", format_millis(elapsed)));
            }
            Err(err) => {
                tracing::warn!(error = %err, "latency probe failed");
                self.output.println(format!("⚠️ ping failed: {err}"));
            }
        }
    }
}

/// Whole milliseconds, rounded, with an `ms` suffix.
pub fn format_millis(elapsed: Duration) -> String {
    format!("{:.0}ms", elapsed.as_secs_f64() * 1000.0)
}

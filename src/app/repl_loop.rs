//! Interactive line loop: controls are handled inline, everything else runs
//! as its own command task so slow answers never block the prompt.

use hud::command::{controls_help, controls_hint, parse_control, ControlAction};
use hud::session::HudSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

/// What one line of stdin asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplInput {
    Blank,
    Control(ControlAction),
    Command(String),
}

pub(crate) fn classify_input(line: &str) -> ReplInput {
    if line.trim().is_empty() {
        return ReplInput::Blank;
    }
    match parse_control(line) {
        Some(action) => ReplInput::Control(action),
        None => ReplInput::Command(line.to_string()),
    }
}

/// Why the line loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopExit {
    /// `:quit` or end of input; running commands finish first.
    Finished,
    /// Ctrl-C; running commands are dropped.
    Interrupted,
}

/// Boot the session and read commands until `:quit`, EOF, or Ctrl-C.
pub(crate) async fn run_repl(session: &HudSession) -> i32 {
    let mut tasks: Vec<JoinHandle<()>> = vec![session.boot().await];
    for line in controls_help() {
        session.output().println(line);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let exit = loop {
        let next = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break LoopExit::Interrupted;
            }
        };
        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => break LoopExit::Finished,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stdin");
                break LoopExit::Finished;
            }
        };

        tasks.retain(|task| !task.is_finished());
        match classify_input(&line) {
            ReplInput::Blank => {}
            ReplInput::Control(ControlAction::Quit) => break LoopExit::Finished,
            ReplInput::Control(ControlAction::NextTheme) => {
                session.next_theme();
            }
            ReplInput::Control(ControlAction::Listen) => {
                if session.voice_enabled() {
                    tasks.push(session.listen());
                } else {
                    tracing::debug!("mic control ignored; voice.recognizer is not configured");
                }
            }
            ReplInput::Control(ControlAction::Unknown(name)) => {
                session
                    .output()
                    .toast(&format!("Unknown control {name}; {}", controls_hint()));
            }
            ReplInput::Command(text) => tasks.push(session.submit(text)),
        }
        session.show_prompt();
    };

    tokio::select! {
        _ = settle_tasks(tasks, exit) => {}
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted while commands were finishing"),
    }
    session.shutdown().await;
    0
}

/// Wait for in-flight command tasks, or drop them after an interrupt.
pub(crate) async fn settle_tasks(tasks: Vec<JoinHandle<()>>, exit: LoopExit) {
    for task in tasks {
        match exit {
            LoopExit::Interrupted => task.abort(),
            LoopExit::Finished => {
                if let Err(err) = task.await {
                    tracing::warn!(error = %err, "command task failed");
                }
            }
        }
    }
}

//! Spoken announcements.
//!
//! Announcements are fire-and-forget: failures are logged and never reach
//! the transcript.

use std::process::Stdio;
use std::sync::Arc;

/// Spoken-feedback sink (`Answer ready.`, `Acknowledged`).
pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str);
}

/// Announcer used when no text-to-speech command is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&self, text: &str) {
        tracing::debug!(text, "announcement (silent)");
    }
}

/// Runs an external text-to-speech command with the text as its last argument.
#[derive(Debug, Clone)]
pub struct CommandAnnouncer {
    argv: Vec<String>,
}

impl CommandAnnouncer {
    /// `None` when `argv` is empty.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        (!argv.is_empty()).then_some(Self { argv })
    }
}

impl Announcer for CommandAnnouncer {
    fn announce(&self, text: &str) {
        let Some((program, args)) = self.argv.split_first() else {
            return;
        };
        let spawned = tokio::process::Command::new(program)
            .args(args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                tracing::warn!(program = %program, error = %err, "failed to start announcer");
                return;
            }
        };
        let program = program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    tracing::warn!(program = %program, %status, "announcer exited unsuccessfully");
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(program = %program, error = %err, "announcer wait failed")
                }
            }
        });
    }
}

/// Pick the announcer for a configured argv.
pub fn announcer_from_argv(argv: &[String]) -> Arc<dyn Announcer> {
    match CommandAnnouncer::new(argv.to_vec()) {
        Some(command) => Arc::new(command),
        None => Arc::new(SilentAnnouncer),
    }
}

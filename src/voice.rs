//! Voice input: one spoken utterance in, one command through the interpreter.
//!
//! Speech capture is delegated to an external recognizer command that prints
//! the final transcript on stdout. Without one the adapter is disabled and
//! the mic control does nothing.

use crate::audio::Announcer;
use crate::command::{CommandInterpreter, Origin};
use crate::error::VoiceError;
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

const LISTENING: &str = "Listening…";
const ACKNOWLEDGED: &str = "Acknowledged";

/// Captures a single final utterance (one alternative).
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self) -> Result<String, VoiceError>;
}

/// Recognizer backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// `None` when `argv` is empty.
    pub fn new(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(&self) -> Result<String, VoiceError> {
        let mut cmd = Command::new(&self.program);
        cmd.kill_on_drop(true);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let output = cmd.output().await.map_err(|err| {
            tracing::warn!(program = %self.program, error = %err, "failed to run recognizer");
            VoiceError::Recognition {
                code: "audio-capture".to_string(),
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = stderr
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| match output.status.code() {
                    Some(status) => format!("exit-{status}"),
                    None => "exit-signal".to_string(),
                });
            return Err(VoiceError::Recognition { code });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| VoiceError::Recognition {
                code: "no-speech".to_string(),
            })
    }
}

/// Mic control adapter.
pub struct VoiceInput {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    announcer: Arc<dyn Announcer>,
}

impl VoiceInput {
    pub fn new(
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self {
            recognizer,
            announcer,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Capture one utterance and dispatch it like typed input.
    ///
    /// Recognition errors surface as a `Voice error: <code>` toast and
    /// dispatch nothing. Returns `Unsupported` without side effects when no
    /// recognizer is configured.
    pub async fn listen(&self, interpreter: &CommandInterpreter) -> Result<(), VoiceError> {
        let Some(recognizer) = &self.recognizer else {
            tracing::debug!("voice input requested but no recognizer is configured");
            return Err(VoiceError::Unsupported);
        };
        let output = interpreter.output();
        output.toast(LISTENING);

        match recognizer.recognize().await {
            Ok(transcript) => {
                tracing::info!(transcript = %transcript, "voice command recognized");
                let action = interpreter.echo(&transcript, Origin::Voice);
                self.announcer.announce(ACKNOWLEDGED);
                if let Some(action) = action {
                    interpreter.execute(action).await;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "voice recognition failed");
                output.toast(&format!("Voice error: {}", err.code()));
                Err(err)
            }
        }
    }
}

//! One-shot `hud exec` flow.

use hud::session::HudSession;

/// Run a single command to completion and exit.
pub(crate) async fn run_exec_mode(session: &HudSession, words: &[String]) -> i32 {
    let text = words.join(" ");
    tracing::info!(command = %text, "exec mode");
    let outcome = session.submit(text).await;
    session.shutdown().await;
    match outcome {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: command task failed: {err}");
            1
        }
    }
}

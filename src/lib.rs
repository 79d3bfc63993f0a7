//! hud: a terminal portfolio HUD.
//!
//! Typed (or spoken) commands are interpreted against a project catalog and
//! a small HTTP backend: answers are revealed character by character, themes
//! persist across runs, and a live telemetry card follows a server push
//! stream that reconnects on its own.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use hud::config::{load_config, TomlPreferences};
//! use hud::session::HudSession;
//! use hud::ui::terminal::TerminalRenderer;
//!
//! # async fn example() {
//! let loaded = load_config(None).unwrap();
//! let sink = TerminalRenderer::stderr(loaded.config.display.color);
//! let prefs = Arc::new(TomlPreferences::new("state.toml"));
//! let session = HudSession::from_config(&loaded.config, sink, prefs);
//! session.boot().await;
//! session.submit("list projects".to_string()).await.unwrap();
//! session.shutdown().await;
//! # }
//! ```

pub mod api;
pub mod audio;
pub mod build_info;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod telemetry;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
pub mod voice;

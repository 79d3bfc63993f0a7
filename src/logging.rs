//! Diagnostic logging to a file.
//!
//! The terminal belongs to the HUD, so `tracing` output goes to
//! `~/.config/hud/hud.log`. `HUD_LOG` takes an `EnvFilter` directive and
//! defaults to `warn`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "HUD_LOG";
const DEFAULT_FILTER: &str = "warn";

static LOGGING_INIT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Install the global subscriber once. Returns the log path in use, or
/// `None` when the file could not be opened and logging stays off.
pub fn init_logging(path: Option<PathBuf>) -> Option<PathBuf> {
    LOGGING_INIT
        .get_or_init(|| {
            let path = path.or_else(crate::config::default_log_path)?;
            let file = match open_log_file(&path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("hud: logging disabled, cannot open {}: {err}", path.display());
                    return None;
                }
            };
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(log_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref()))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok()?;
            Some(path)
        })
        .clone()
}

fn log_filter(directive: Option<&str>) -> EnvFilter {
    match directive.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!("hud: ignoring {LOG_FILTER_ENV}={directive}: {err}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

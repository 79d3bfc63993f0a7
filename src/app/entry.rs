//! Application entry orchestration for the hud CLI.

use crate::app::exec_mode::run_exec_mode;
use crate::app::repl_loop::run_repl;
use crate::cli::{Args, Command};
use hud::build_info::startup_metadata_line;
use hud::config::{
    default_preferences_path, initialize_default_global_config, load_config, Config,
    GlobalConfigInitResult, MemoryPreferences, PreferenceStore, TomlPreferences,
};
use hud::logging::init_logging;
use hud::session::HudSession;
use hud::ui::terminal::TerminalRenderer;
use std::sync::Arc;

/// Top-level CLI entrypoint that dispatches init/exec/interactive flows.
pub(crate) async fn run(args: Args) -> i32 {
    if let Some(Command::Init { force }) = args.command.as_ref() {
        return match run_init_flow(*force) {
            Ok(message) => {
                eprintln!("{message}");
                0
            }
            Err(message) => {
                eprintln!("error: {message}");
                1
            }
        };
    }

    let loaded = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    let mut config = loaded.config;
    if let Err(message) = apply_cli_overrides(&args, &mut config) {
        eprintln!("error: {message}");
        return 1;
    }

    let log_path = init_logging(None);
    tracing::info!(
        source = %loaded.source,
        log = ?log_path,
        base_url = %config.api.base_url,
        "{}",
        startup_metadata_line()
    );
    for warning in &loaded.warnings {
        eprintln!("warning: {warning}");
        tracing::warn!("{warning}");
    }

    let sink = TerminalRenderer::stderr(config.display.color);
    let prefs = preference_store(&config);

    match args.command {
        Some(Command::Exec { command }) => {
            config.telemetry.enabled = false;
            let session = HudSession::from_config(&config, sink, prefs);
            run_exec_mode(&session, &command).await
        }
        Some(Command::Init { .. }) | None => {
            let session = HudSession::from_config(&config, sink, prefs);
            run_repl(&session).await
        }
    }
}

/// Apply flag overrides on top of the loaded config.
fn apply_cli_overrides(args: &Args, config: &mut Config) -> Result<(), String> {
    if let Some(url) = args.base_url.as_deref() {
        let url = url.trim().trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("--base-url `{url}` must start with http:// or https://"));
        }
        config.api.base_url = url.to_string();
    }
    if args.no_color {
        config.display.color = false;
    }
    if args.no_telemetry {
        config.telemetry.enabled = false;
    }
    Ok(())
}

fn preference_store(config: &Config) -> Arc<dyn PreferenceStore> {
    match config
        .preferences
        .explicit_path()
        .or_else(default_preferences_path)
    {
        Some(path) => Arc::new(TomlPreferences::new(path)),
        None => {
            tracing::warn!("no preferences path available; theme choice will not persist");
            Arc::new(MemoryPreferences::new(None))
        }
    }
}

fn run_init_flow(force: bool) -> Result<String, String> {
    match initialize_default_global_config(force) {
        Ok(GlobalConfigInitResult::Created { path }) => {
            Ok(format!("Wrote default config to {}", path.display()))
        }
        Ok(GlobalConfigInitResult::AlreadyInitialized { path }) => Ok(format!(
            "Config already exists at {}; pass --force to overwrite it.",
            path.display()
        )),
        Ok(GlobalConfigInitResult::Overwritten { path, backup_path }) => Ok(format!(
            "Rewrote {} (previous config saved to {})",
            path.display(),
            backup_path.display()
        )),
        Err(err) => Err(format!("failed to initialize config: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_loaded_config() {
        let args = Args::parse_from([
            "hud",
            "--base-url",
            "https://api.example/",
            "--no-color",
            "--no-telemetry",
        ]);
        let mut config = Config::default();
        apply_cli_overrides(&args, &mut config).unwrap();
        assert_eq!(config.api.base_url, "https://api.example");
        assert!(!config.display.color);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let args = Args::parse_from(["hud"]);
        let mut config = Config::default();
        apply_cli_overrides(&args, &mut config).unwrap();
        assert_eq!(config.api.base_url, Config::default().api.base_url);
        assert!(config.telemetry.enabled);
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let args = Args::parse_from(["hud", "--base-url", "localhost:8080"]);
        let err = apply_cli_overrides(&args, &mut Config::default()).unwrap_err();
        assert!(err.contains("http://"), "got: {err}");
    }
}

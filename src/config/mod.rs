//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`HUD_BASE_URL`, `HUD_NO_TELEMETRY`)
//! 2. TOML file specified via `--config`
//! 3. `./hud.toml` in the current directory
//! 4. `$XDG_CONFIG_HOME/hud/hud.toml` (or `~/.config/hud/hud.toml`)
//! 5. Built-in defaults
//!
//! CLI flags are applied on top by the binary after loading.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

mod defaults;
mod init;
mod persist;
mod types;

pub use init::{
    config_root_dir, default_global_config_path, default_log_path, default_preferences_path,
    initialize_default_global_config,
};
pub use persist::{MemoryPreferences, PreferenceStore, TomlPreferences};
pub use types::{
    ApiConfig, Config, DisplayConfig, GlobalConfigInitResult, LoadedConfig, PreferencesConfig,
    TelemetryConfig, VoiceConfig,
};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum ConfigSource {
    Explicit(PathBuf),
    Local,
    Global(PathBuf),
    BuiltInDefaults,
}

impl ConfigSource {
    fn describe(&self) -> String {
        match self {
            Self::Explicit(path) | Self::Global(path) => path.display().to_string(),
            Self::Local => "./hud.toml".to_string(),
            Self::BuiltInDefaults => "built-in defaults".to_string(),
        }
    }
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    let mut warnings = Vec::new();
    apply_env_overrides(&mut config, &env_lookup);
    normalize(&mut config, &mut warnings)?;

    Ok(LoadedConfig {
        config,
        source: source.describe(),
        warnings,
    })
}

fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Ok(text) = read_file(Path::new("hud.toml")) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join("hud").join("hud.toml");
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = env_lookup("HUD_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    if env_lookup("HUD_NO_TELEMETRY").is_some_and(|v| is_truthy(&v)) {
        config.telemetry.enabled = false;
    }
}

fn normalize(config: &mut Config, warnings: &mut Vec<String>) -> Result<(), ConfigError> {
    let base = config.api.base_url.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ConfigError::Invalid("api.base_url cannot be empty".to_string()));
    }
    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(ConfigError::Invalid(format!(
            "api.base_url `{base}` must start with http:// or https://"
        )));
    }
    config.api.base_url = base;

    let path = config.telemetry.path.trim();
    config.telemetry.path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if config.display.prompt.trim().is_empty() {
        warnings.push("display.prompt is empty; using the default prompt.".to_string());
        config.display.prompt = DisplayConfig::default().prompt;
    }
    config.voice.recognizer.retain(|arg| !arg.trim().is_empty());
    config.voice.announcer.retain(|arg| !arg.trim().is_empty());
    Ok(())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

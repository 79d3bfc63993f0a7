//! Per-user file locations under `~/.config/hud/` and `hud init`.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::DEFAULT_HUD_CONFIG_TEMPLATE;
use super::GlobalConfigInitResult;

const APP_DIR: &str = "hud";
const CONFIG_FILE: &str = "hud.toml";
const PREFERENCES_FILE: &str = "state.toml";
const LOG_FILE: &str = "hud.log";

/// `$XDG_CONFIG_HOME`, else `~/.config`.
pub fn config_root_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|root| !root.as_os_str().is_empty())
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

fn app_file(name: &str) -> Option<PathBuf> {
    config_root_dir().map(|root| root.join(APP_DIR).join(name))
}

pub fn default_global_config_path() -> Option<PathBuf> {
    app_file(CONFIG_FILE)
}

/// Where the last applied theme is kept unless `[preferences].path` says otherwise.
pub fn default_preferences_path() -> Option<PathBuf> {
    app_file(PREFERENCES_FILE)
}

pub fn default_log_path() -> Option<PathBuf> {
    app_file(LOG_FILE)
}

/// Write the commented default config to `~/.config/hud/hud.toml`.
///
/// An existing file is only replaced with `force`; its previous content is
/// kept in `hud.toml.bak` (one backup slot, replaced on every forced init).
pub fn initialize_default_global_config(
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let path = default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("no home directory to hold hud.toml; use --config".to_string())
    })?;
    write_template(&path, force)
}

pub(super) fn write_template(
    path: &Path,
    force: bool,
) -> Result<GlobalConfigInitResult, ConfigError> {
    let existing = path.exists();
    if existing && !force {
        return Ok(GlobalConfigInitResult::AlreadyInitialized {
            path: path.to_path_buf(),
        });
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let backup_path = if existing {
        let backup = path.with_extension("toml.bak");
        std::fs::copy(path, &backup)?;
        Some(backup)
    } else {
        None
    };
    std::fs::write(path, DEFAULT_HUD_CONFIG_TEMPLATE)?;
    tracing::info!(path = %path.display(), replaced = existing, "wrote default config");

    let path = path.to_path_buf();
    Ok(match backup_path {
        Some(backup_path) => GlobalConfigInitResult::Overwritten { path, backup_path },
        None => GlobalConfigInitResult::Created { path },
    })
}

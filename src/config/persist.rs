//! Persisted UI preference (the last applied theme).
//!
//! Only `[display].theme` is ever written; the rest of the preferences file
//! is preserved line for line.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ConfigError;

/// Key/value store for the single persisted theme preference.
pub trait PreferenceStore: Send + Sync {
    /// Last stored theme name, if any. Read failures count as "absent".
    fn load_theme(&self) -> Option<String>;
    /// Store `theme` as the new preference.
    fn store_theme(&self, theme: &str) -> Result<(), ConfigError>;
}

/// File-backed preference store using a small TOML document.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path: PathBuf,
}

impl TomlPreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlPreferences {
    fn load_theme(&self) -> Option<String> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        read_display_theme(&text)
    }

    fn store_theme(&self, theme: &str) -> Result<(), ConfigError> {
        let normalized_theme = theme.trim().to_ascii_lowercase();
        if normalized_theme.is_empty() {
            return Err(ConfigError::Invalid(
                "display.theme cannot be empty".to_string(),
            ));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let existing = std::fs::read_to_string(&self.path).unwrap_or_default();
        let updated = upsert_display_theme(&existing, &normalized_theme);
        std::fs::write(&self.path, updated)?;
        Ok(())
    }
}

/// In-process preference store for hosts without a writable config dir.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    theme: Mutex<Option<String>>,
}

impl MemoryPreferences {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            theme: Mutex::new(initial.map(str::to_string)),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Option<String> {
        self.theme.lock().ok().and_then(|slot| slot.clone())
    }

    fn store_theme(&self, theme: &str) -> Result<(), ConfigError> {
        let mut slot = self
            .theme
            .lock()
            .map_err(|_| ConfigError::Invalid("preference store poisoned".to_string()))?;
        *slot = Some(theme.to_string());
        Ok(())
    }
}

fn read_display_theme(text: &str) -> Option<String> {
    let doc: toml::Value = toml::from_str(text).ok()?;
    let theme = doc.get("display")?.get("theme")?.as_str()?.trim();
    (!theme.is_empty()).then(|| theme.to_string())
}

/// Upsert `display.theme` while preserving unrelated file contents.
fn upsert_display_theme(input: &str, theme: &str) -> String {
    let mut lines = if input.is_empty() {
        Vec::new()
    } else {
        input.lines().map(str::to_string).collect::<Vec<_>>()
    };

    let display_idx = lines
        .iter()
        .position(|line| line.trim().eq_ignore_ascii_case("[display]"));

    if let Some(start) = display_idx {
        let mut end = lines.len();
        for (idx, line) in lines.iter().enumerate().skip(start + 1) {
            let trimmed = line.trim();
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                end = idx;
                break;
            }
        }

        for idx in (start + 1)..end {
            if is_assignment_key(&lines[idx], "theme") {
                lines[idx] = format!("theme = \"{theme}\"");
                return ensure_trailing_newline(lines.join("\n"));
            }
        }

        lines.insert(start + 1, format!("theme = \"{theme}\""));
        return ensure_trailing_newline(lines.join("\n"));
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push("[display]".to_string());
    lines.push(format!("theme = \"{theme}\""));
    ensure_trailing_newline(lines.join("\n"))
}

/// Return true when `line` assigns a value to `key` (e.g., `key = ...`).
fn is_assignment_key(line: &str, key: &str) -> bool {
    let trimmed = line.trim_start();
    let Some(rest) = trimmed.strip_prefix(key) else {
        return false;
    };
    rest.trim_start().starts_with('=')
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

//! Theme state machine.
//!
//! Holds the single active theme, pushes palette changes to the presentation
//! layer, and persists the preference after every successful change. All
//! mutation happens under one lock, never held across an await.

mod palette;

pub use palette::{Palette, PaletteToken, ThemeName};

use crate::config::PreferenceStore;
use crate::ui::render::RenderSink;
use std::sync::{Arc, Mutex, MutexGuard};

/// Fixed rotation used by the next-theme control. `yellow` is deliberately
/// absent; it stays reachable through `theme yellow`.
pub const CYCLE_ROTATION: [ThemeName; 5] = [
    ThemeName::Dark,
    ThemeName::Neon,
    ThemeName::Green,
    ThemeName::Red,
    ThemeName::Blue,
];

/// Owner of the active theme.
pub struct ThemeMachine {
    active: Mutex<ThemeName>,
    prefs: Arc<dyn PreferenceStore>,
    sink: Arc<dyn RenderSink>,
}

impl ThemeMachine {
    /// Restore the persisted preference, falling back to `fallback`.
    ///
    /// A missing preference is written back as `fallback`; an unreadable or
    /// unknown one is left untouched on disk.
    pub fn init(
        prefs: Arc<dyn PreferenceStore>,
        sink: Arc<dyn RenderSink>,
        fallback: ThemeName,
    ) -> Self {
        let stored = prefs.load_theme();
        let initial = stored
            .as_deref()
            .and_then(ThemeName::parse)
            .unwrap_or(fallback);
        let machine = Self {
            active: Mutex::new(initial),
            prefs,
            sink,
        };
        {
            let _guard = machine.lock();
            machine.publish(initial, stored.is_none());
        }
        if let Some(raw) = stored.filter(|raw| ThemeName::parse(raw).is_none()) {
            tracing::warn!(preference = %raw, "ignoring unknown persisted theme");
        }
        machine
    }

    /// Currently active theme.
    pub fn active(&self) -> ThemeName {
        *self.lock()
    }

    /// Activate `name` if it names a known palette.
    ///
    /// Unknown names leave state and preference untouched and return `None`.
    pub fn apply(&self, name: &str) -> Option<ThemeName> {
        let Some(theme) = ThemeName::parse(name) else {
            tracing::debug!(theme = name, "ignoring unknown theme");
            return None;
        };
        let mut active = self.lock();
        *active = theme;
        self.publish(theme, true);
        Some(theme)
    }

    /// Advance through [`CYCLE_ROTATION`] starting from the persisted preference.
    pub fn cycle_next(&self) -> ThemeName {
        let mut active = self.lock();
        let current = self
            .prefs
            .load_theme()
            .unwrap_or_else(|| ThemeName::Dark.as_str().to_string());
        let next = next_in_rotation(&current);
        *active = next;
        self.publish(next, true);
        next
    }

    fn publish(&self, theme: ThemeName, persist: bool) {
        self.sink.palette(theme, theme.palette());
        if !persist {
            return;
        }
        if let Err(err) = self.prefs.store_theme(theme.as_str()) {
            tracing::warn!(theme = %theme, error = %err, "failed to persist theme preference");
        }
    }

    fn lock(&self) -> MutexGuard<'_, ThemeName> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Next rotation entry after `current`; names outside the rotation restart at
/// its head.
fn next_in_rotation(current: &str) -> ThemeName {
    let position = ThemeName::parse(current)
        .and_then(|theme| CYCLE_ROTATION.iter().position(|entry| *entry == theme));
    let next = position.map(|idx| idx + 1).unwrap_or(0) % CYCLE_ROTATION.len();
    CYCLE_ROTATION[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryPreferences;
    use crate::testsupport::{RecordingSink, SinkEvent};

    fn machine_with(
        stored: Option<&str>,
    ) -> (ThemeMachine, Arc<MemoryPreferences>, Arc<RecordingSink>) {
        let prefs = Arc::new(MemoryPreferences::new(stored));
        let sink = Arc::new(RecordingSink::default());
        let machine = ThemeMachine::init(prefs.clone(), sink.clone(), ThemeName::Dark);
        (machine, prefs, sink)
    }

    #[test]
    fn init_defaults_to_dark_and_persists_it() {
        let (machine, prefs, sink) = machine_with(None);
        assert_eq!(machine.active(), ThemeName::Dark);
        assert_eq!(prefs.load_theme().as_deref(), Some("dark"));
        assert_eq!(sink.palettes(), vec![ThemeName::Dark]);
    }

    #[test]
    fn init_restores_valid_preference() {
        let (machine, _, _) = machine_with(Some("red"));
        assert_eq!(machine.active(), ThemeName::Red);
    }

    #[test]
    fn init_ignores_invalid_preference_without_overwriting() {
        let (machine, prefs, _) = machine_with(Some("plaid"));
        assert_eq!(machine.active(), ThemeName::Dark);
        assert_eq!(prefs.load_theme().as_deref(), Some("plaid"));
    }

    #[test]
    fn apply_known_theme_changes_and_persists() {
        let (machine, prefs, sink) = machine_with(None);
        assert_eq!(machine.apply("neon"), Some(ThemeName::Neon));
        assert_eq!(machine.active(), ThemeName::Neon);
        assert_eq!(prefs.load_theme().as_deref(), Some("neon"));
        assert!(sink
            .events()
            .contains(&SinkEvent::Palette(ThemeName::Neon)));
    }

    #[test]
    fn apply_unknown_theme_is_a_silent_noop() {
        let (machine, prefs, sink) = machine_with(Some("green"));
        let before = sink.events().len();
        assert_eq!(machine.apply("bogus"), None);
        assert_eq!(machine.active(), ThemeName::Green);
        assert_eq!(prefs.load_theme().as_deref(), Some("green"));
        assert_eq!(sink.events().len(), before);
    }

    #[test]
    fn cycle_is_a_closed_five_cycle_from_dark() {
        let (machine, _, _) = machine_with(None);
        let seen: Vec<_> = (0..5).map(|_| machine.cycle_next()).collect();
        assert_eq!(
            seen,
            vec![
                ThemeName::Neon,
                ThemeName::Green,
                ThemeName::Red,
                ThemeName::Blue,
                ThemeName::Dark
            ]
        );
        assert_eq!(machine.active(), ThemeName::Dark);
    }

    #[test]
    fn cycle_never_produces_yellow() {
        for start in ThemeName::ALL {
            let (machine, _, _) = machine_with(Some(start.as_str()));
            for _ in 0..12 {
                assert_ne!(machine.cycle_next(), ThemeName::Yellow, "from {start}");
            }
        }
    }

    #[test]
    fn cycle_from_yellow_restarts_at_dark() {
        let (machine, _, _) = machine_with(Some("yellow"));
        assert_eq!(machine.active(), ThemeName::Yellow);
        assert_eq!(machine.cycle_next(), ThemeName::Dark);
    }

    #[test]
    fn cycle_starts_from_persisted_preference() {
        let (machine, prefs, _) = machine_with(None);
        prefs.store_theme("red").unwrap();
        assert_eq!(machine.cycle_next(), ThemeName::Blue);
    }
}

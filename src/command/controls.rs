//! Out-of-grammar controls (`:theme`, `:mic`, `:quit`).
//!
//! These stand in for the HUD's buttons and never reach the interpreter.

/// Static control metadata used by parsing and the startup hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub name: &'static str,
    pub description: &'static str,
}

pub const CONTROLS: [Control; 3] = [
    Control {
        name: ":theme",
        description: "Cycle to the next theme.",
    },
    Control {
        name: ":mic",
        description: "Capture one spoken command.",
    },
    Control {
        name: ":quit",
        description: "Leave the HUD.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    NextTheme,
    Listen,
    Quit,
    Unknown(String),
}

/// Parse a control from user input.
///
/// Returns `None` if the input is not a control, so it should go to the
/// command interpreter instead.
pub fn parse_control(input: &str) -> Option<ControlAction> {
    let trimmed = input.trim();
    if !trimmed.starts_with(':') {
        return None;
    }
    let token = trimmed
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let action = match token.as_str() {
        ":theme" | ":t" => ControlAction::NextTheme,
        ":mic" | ":m" => ControlAction::Listen,
        ":quit" | ":exit" | ":q" => ControlAction::Quit,
        other => ControlAction::Unknown(other.to_string()),
    };
    Some(action)
}

/// One-line summary of the available controls.
pub fn controls_hint() -> String {
    let names: Vec<&str> = CONTROLS.iter().map(|control| control.name).collect();
    format!("controls: {}", names.join(", "))
}

/// One line per control with its description, for the startup banner.
pub fn controls_help() -> Vec<String> {
    CONTROLS
        .iter()
        .map(|control| format!("  {:<7} {}", control.name, control.description))
        .collect()
}

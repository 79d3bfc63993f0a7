//! Command grammar: raw terminal input to [`ParsedAction`].

/// One classified command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    Help,
    ListProjects,
    /// Lower-cased project query.
    AboutProject(String),
    /// Lower-cased technology term with the `tech`/`skill` keyword removed.
    TechQuery(String),
    /// Requested theme name; `dark` when none was given.
    SetTheme(String),
    /// Page section to bring into view.
    OpenSection(String),
    Ping,
    /// Original trimmed text, case preserved.
    FreeformQuery(String),
}

/// Section revealed by `open about`.
pub const ABOUT_SECTION: &str = "brand";

const FALLBACK_THEME: &str = "dark";

/// Classify one line of input.
///
/// Returns `None` for empty or whitespace-only input; every other input maps
/// to exactly one action, with [`ParsedAction::FreeformQuery`] as the
/// catch-all. Rules are matched in order on a lower-cased copy.
pub fn interpret(raw: &str) -> Option<ParsedAction> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();

    let action = if lowered == "help" {
        ParsedAction::Help
    } else if lowered == "list projects" {
        ParsedAction::ListProjects
    } else if let Some(rest) = lowered.strip_prefix("about ") {
        ParsedAction::AboutProject(rest.trim().to_string())
    } else if let Some(rest) = lowered
        .strip_prefix("tech ")
        .or_else(|| lowered.strip_prefix("skill "))
    {
        ParsedAction::TechQuery(rest.trim().to_string())
    } else if lowered.starts_with("theme") {
        let name = lowered.split_whitespace().nth(1).unwrap_or(FALLBACK_THEME);
        ParsedAction::SetTheme(name.to_string())
    } else if lowered == "open about" {
        ParsedAction::OpenSection(ABOUT_SECTION.to_string())
    } else if lowered == "ping" {
        ParsedAction::Ping
    } else {
        ParsedAction::FreeformQuery(trimmed.to_string())
    };
    Some(action)
}

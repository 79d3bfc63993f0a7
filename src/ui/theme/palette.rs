//! Fixed palette table: six named themes, seven ordered color tokens each.

use crossterm::style::Color;
use std::fmt;

/// Named HUD theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    Neon,
    Green,
    Red,
    Blue,
    Dark,
    Yellow,
}

impl ThemeName {
    /// Every selectable theme, in palette-table order.
    pub const ALL: [ThemeName; 6] = [
        Self::Neon,
        Self::Green,
        Self::Red,
        Self::Blue,
        Self::Dark,
        Self::Yellow,
    ];

    /// Parse a user-facing theme name (case-insensitive, trimmed).
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|theme| theme.as_str() == normalized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neon => "neon",
            Self::Green => "green",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Dark => "dark",
            Self::Yellow => "yellow",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Neon => &NEON,
            Self::Green => &GREEN,
            Self::Red => &RED,
            Self::Blue => &BLUE,
            Self::Dark => &DARK,
            Self::Yellow => &YELLOW,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a color within a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteToken {
    Background,
    Grid,
    Primary,
    Accent,
    Warning,
    Text,
    Muted,
}

impl PaletteToken {
    pub const ALL: [PaletteToken; 7] = [
        Self::Background,
        Self::Grid,
        Self::Primary,
        Self::Accent,
        Self::Warning,
        Self::Text,
        Self::Muted,
    ];

    /// Style-variable key the token is published under.
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => "bg",
            Self::Grid => "grid",
            Self::Primary => "primary",
            Self::Accent => "accent",
            Self::Warning => "warn",
            Self::Text => "text",
            Self::Muted => "muted",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Grid => 1,
            Self::Primary => 2,
            Self::Accent => 3,
            Self::Warning => 4,
            Self::Text => 5,
            Self::Muted => 6,
        }
    }
}

/// Seven ordered hex color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([&'static str; 7]);

impl Palette {
    /// Raw hex value of one token.
    pub fn hex(&self, token: PaletteToken) -> &'static str {
        self.0[token.index()]
    }

    /// Terminal color of one token.
    pub fn color(&self, token: PaletteToken) -> Color {
        parse_hex_color(self.hex(token)).unwrap_or(Color::Reset)
    }

    /// `(key, hex)` pairs in token order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        PaletteToken::ALL
            .iter()
            .map(move |token| (token.key(), self.hex(*token)))
    }
}

const NEON: Palette = Palette([
    "#05070c", "#0a1624", "#79aab1ff", "#45ffa2", "#ff6b6b", "#d7f9ff", "#7acfe3",
]);
const GREEN: Palette = Palette([
    "#04110a", "#0b1f12", "#45ffa2", "#37e3ff", "#ffb86b", "#ddffe9", "#99f3c2",
]);
const RED: Palette = Palette([
    "#160606", "#261111", "#ff6b6b", "#ffd166", "#37e3ff", "#ffd7d7", "#ff9c9c",
]);
const BLUE: Palette = Palette([
    "#060912", "#0b1530", "#8ab4ff", "#37e3ff", "#ff6b6b", "#dbe6ff", "#a6c8ff",
]);
const DARK: Palette = Palette([
    "#05070c", "#0a1624", "#37e3ff", "#45ffa2", "#ff6b6b", "#d7f9ff", "#7acfe3",
]);
const YELLOW: Palette = Palette([
    "#1a1000", "#2c1f00", "#ffd166", "#ff6b6b", "#37e3ff", "#fff0d7", "#ffe29c",
]);

/// Parse `#RRGGBB` or `#RRGGBBAA`; the alpha channel is ignored.
pub(crate) fn parse_hex_color(input: &str) -> Result<Color, String> {
    let normalized = input.trim().to_ascii_lowercase();
    let Some(hex) = normalized.strip_prefix('#') else {
        return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
    };
    if hex.len() != 6 && hex.len() != 8 {
        return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color `{input}`"))
    };
    Ok(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

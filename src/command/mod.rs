//! Command grammar, project catalog, and dispatch.

mod catalog;
mod controls;
mod interpreter;
mod parse;

pub use catalog::{Catalog, Project};
pub use controls::{
    controls_help, controls_hint, parse_control, Control, ControlAction, CONTROLS,
};
pub use interpreter::{
    format_millis, CommandInterpreter, InterpreterParams, Origin, HELP_TEXT,
};
pub use parse::{interpret, ParsedAction, ABOUT_SECTION};

//! Terminal-facing UI: the render contract, the transcript writer, themes,
//! and the crossterm renderer.

pub mod output;
pub mod render;
pub mod terminal;
pub mod theme;

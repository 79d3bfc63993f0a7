//! Binary-local application orchestration.
//!
//! `entry` loads config and wires the session; the two run modes live in
//! their own modules.

pub(crate) mod entry;
pub(crate) mod exec_mode;
pub(crate) mod repl_loop;

//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// A terminal portfolio HUD with live telemetry and paced answers.
#[derive(Debug, Parser)]
#[command(
    name = "hud",
    version = hud::build_info::VERSION,
    long_version = hud::build_info::LONG_VERSION
)]
pub struct Args {
    /// Path to config file (default: ./hud.toml or ~/.config/hud/hud.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the backend base URL.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not subscribe to the telemetry stream.
    #[arg(long = "no-telemetry")]
    pub no_telemetry: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the default config to ~/.config/hud/hud.toml.
    Init {
        /// Overwrite an existing config after backing it up.
        #[arg(long)]
        force: bool,
    },
    /// Run one command non-interactively and exit once it has finished.
    Exec {
        /// Command text, e.g. `hud exec tech rust`.
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            num_args = 1..
        )]
        command: Vec<String>,
    },
}

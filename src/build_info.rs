//! Version and build stamp for `--version` and the startup log line.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `--version` body: semver, then commit and build time on their own lines.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("HUD_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("HUD_BUILD_TIMESTAMP")
);

pub fn startup_metadata_line() -> String {
    format!(
        "hud v{VERSION} ({}, built {})",
        env!("HUD_BUILD_GIT_HASH"),
        env!("HUD_BUILD_TIMESTAMP")
    )
}

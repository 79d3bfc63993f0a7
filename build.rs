//! Stamps the binary with the git commit and build time shown by
//! `hud --version` and in the startup log line.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=HUD_BUILD_GIT_HASH");

    let commit = std::env::var("HUD_BUILD_GIT_HASH")
        .ok()
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let built = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    println!("cargo:rustc-env=HUD_BUILD_GIT_HASH={commit}");
    println!("cargo:rustc-env=HUD_BUILD_TIMESTAMP=unix:{built}");
}

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (output.status.success() && !hash.is_empty()).then(|| hash.to_string())
}

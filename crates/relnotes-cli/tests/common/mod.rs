#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a configured `relnotes` command suitable for integration tests.
///
/// Clears `RELNOTES_*` variables inherited from the developer's shell so that
/// only explicit arguments drive behavior.
#[allow(dead_code)]
pub fn relnotes_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("relnotes"));
    cmd.timeout(CMD_TIMEOUT);
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("RELNOTES_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

/// Write `content` to `name` inside `dir` and return the full path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

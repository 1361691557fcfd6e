//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use chatreel::config::CONFIG_DIR_ENV;
use chatreel::DemoScript;

/// Directory holding the test script fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Path of a fixture by file name.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Load and validate a fixture script.
pub fn load_script(name: &str) -> DemoScript {
    DemoScript::load(&fixture(name)).unwrap_or_else(|e| panic!("fixture {}: {}", name, e))
}

/// Write `content` to a script file in a fresh temp dir.
pub fn temp_script(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("script.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// The chatreel binary with an isolated config dir and colors off.
pub fn chatreel(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chatreel").unwrap();
    cmd.env(CONFIG_DIR_ENV, config_dir).env("NO_COLOR", "1");
    cmd
}

//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated source tree with a blueprint at its root.
pub struct TestEnv {
  pub temp: TempDir,
  pub blueprint_path: PathBuf,
}

impl TestEnv {
  /// Create from a blueprint fixture.
  ///
  /// Copies the fixture content to `blueprint.json` in a temporary directory.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let blueprint_path = temp.path().join("blueprint.json");
    std::fs::write(&blueprint_path, fixture_content(name)).unwrap();
    Self { temp, blueprint_path }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Source files for the `host_tools.json` fixture.
  pub fn with_host_tools_sources(self) -> Self {
    self.write_file("util/src/com/example/Util.java", "class Util {}");
    self.write_file("tool/src/com/example/Main.java", "class Main {}");
    self.write_file("tool/tool.sh", "#!/bin/sh\n");
    self
  }

  /// Get a Command for the jplan binary with overrides cleared.
  pub fn jplan_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("jplan");
    cmd.env_remove("RUN_ERROR_PRONE");
    cmd.env_remove("NO_OPTIMIZE_DX");
    cmd.env_remove("GENERATE_DEX_DEBUG");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

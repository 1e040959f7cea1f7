//! Tool flag construction.
//!
//! Flags are plain values threaded from the resolver into the transforms that
//! use them; nothing is stashed in a shared variable namespace.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::EnvOverrides;
use crate::platform::{PlatformConfig, Target};
use crate::transform::ArtifactPath;

/// Arguments of a javac (or stricter-analysis) compile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavacArgs {
  /// Module-specific javac flags.
  pub javac_flags: Vec<String>,
  /// Value passed as `-source` and `-target`.
  pub java_version: String,
  /// `-bootclasspath ...`, if any.
  pub bootclasspath: Option<String>,
  /// `-classpath ...`, if any.
  pub classpath: Option<String>,
  /// Include flags for the aidl tool.
  pub aidl_flags: Vec<String>,
  /// File lists of extra sources appended to the command line.
  pub src_file_lists: Vec<ArtifactPath>,
}

fn join_paths(paths: &[ArtifactPath]) -> String {
  paths.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(":")
}

/// `-bootclasspath` flag for a compile.
///
/// Device compiles with nothing on the boot classpath get an explicitly empty
/// one, so javac never falls back to the host JDK's runtime.
pub fn bootclasspath_flag(bootclasspath: &[ArtifactPath], target: Target) -> Option<String> {
  if !bootclasspath.is_empty() {
    Some(format!("-bootclasspath {}", join_paths(bootclasspath)))
  } else if target.is_device() {
    Some(r#"-bootclasspath """#.to_string())
  } else {
    None
  }
}

/// `-classpath` flag for a compile, absent when the classpath is empty.
pub fn classpath_flag(classpath: &[ArtifactPath]) -> Option<String> {
  if classpath.is_empty() {
    None
  } else {
    Some(format!("-classpath {}", join_paths(classpath)))
  }
}

/// Everything the aidl include flags are derived from.
#[derive(Debug, Clone)]
pub struct AidlIncludes<'a> {
  /// Preprocessed aidl from an sdk dependency.
  pub preprocessed: Option<&'a ArtifactPath>,
  /// Include directories exported by dependencies.
  pub dep_dirs: &'a [PathBuf],
  /// Directories this module exports.
  pub export_dirs: &'a [PathBuf],
  /// This module's own aidl include directories.
  pub local_dirs: &'a [PathBuf],
  /// The module's source directory.
  pub module_dir: &'a Path,
  /// `<module_dir>/src`, when it exists.
  pub local_src: Option<&'a Path>,
}

impl Default for AidlIncludes<'_> {
  fn default() -> Self {
    Self {
      preprocessed: None,
      dep_dirs: &[],
      export_dirs: &[],
      local_dirs: &[],
      module_dir: Path::new(""),
      local_src: None,
    }
  }
}

fn include(path: &Path) -> String {
  if path.as_os_str().is_empty() {
    "-I.".to_string()
  } else {
    format!("-I{}", path.display())
  }
}

impl AidlIncludes<'_> {
  /// Build the ordered flag list.
  ///
  /// A preprocessed aidl supersedes directory-based inclusion entirely: when
  /// present it is the only flag. Otherwise the order is dependency dirs,
  /// exported dirs, local dirs, the module dir, then `src`.
  pub fn flags(&self) -> Vec<String> {
    if let Some(preprocessed) = self.preprocessed {
      return vec![format!("-p{}", preprocessed)];
    }

    let mut flags: Vec<String> = self
      .dep_dirs
      .iter()
      .chain(self.export_dirs)
      .chain(self.local_dirs)
      .map(|d| include(d))
      .collect();
    flags.push(include(self.module_dir));
    if let Some(src) = self.local_src {
      flags.push(include(src));
    }
    flags
  }
}

/// Whether an sdk version names a stub set rather than a numbered release.
pub fn is_stub_sdk_version(sdk_version: &str) -> bool {
  matches!(sdk_version, "" | "current" | "test_current" | "system_current")
}

/// `--min-sdk-version` value: the platform default for stub sets, otherwise
/// the configured version verbatim.
pub fn min_sdk_version(sdk_version: &str, platform: &PlatformConfig) -> String {
  if is_stub_sdk_version(sdk_version) {
    platform.default_app_target_sdk.to_string()
  } else {
    sdk_version.to_string()
  }
}

/// Full dx flag list for a module.
pub fn dex_flags(
  dxflags: &[String],
  sdk_version: &str,
  env: &EnvOverrides,
  platform: &PlatformConfig,
  out_dir: &Path,
) -> Vec<String> {
  let mut flags = dxflags.to_vec();

  if env.no_optimize_dx {
    flags.push("--no-optimize".to_string());
  }

  if env.generate_dex_debug {
    flags.push("--debug".to_string());
    flags.push("--verbose".to_string());
    flags.push(format!("--dump-to={}", out_dir.join("classes.lst").display()));
    flags.push("--dump-width=1000".to_string());
  }

  flags.push(format!("--min-sdk-version={}", min_sdk_version(sdk_version, platform)));
  flags
}

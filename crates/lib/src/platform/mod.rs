//! Platform configuration for a planning run.
//!
//! Holds everything the planner needs to know about the build environment that
//! is not part of any single module: where intermediates and installed files go,
//! and the default java and sdk versions.

mod target;

pub use target::Target;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
  DEFAULT_APP_TARGET_SDK, DEFAULT_DEVICE_INSTALL_DIR, DEFAULT_HOST_INSTALL_DIR, DEFAULT_JAVA_VERSION,
  DEFAULT_OUT_DIR,
};

/// Build-wide settings, usually read from the `platform` section of a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
  /// Root for per-module intermediates.
  pub out_dir: PathBuf,
  /// Install root for device modules.
  pub device_install_dir: PathBuf,
  /// Install root for host modules.
  pub host_install_dir: PathBuf,
  /// Java language version used when a module does not set `java_version`.
  pub default_java_version: String,
  /// Minimum sdk passed to dx when a module compiles against a stub set.
  pub default_app_target_sdk: u32,
}

impl Default for PlatformConfig {
  fn default() -> Self {
    Self {
      out_dir: PathBuf::from(DEFAULT_OUT_DIR),
      device_install_dir: PathBuf::from(DEFAULT_DEVICE_INSTALL_DIR),
      host_install_dir: PathBuf::from(DEFAULT_HOST_INSTALL_DIR),
      default_java_version: DEFAULT_JAVA_VERSION.to_string(),
      default_app_target_sdk: DEFAULT_APP_TARGET_SDK,
    }
  }
}

impl PlatformConfig {
  /// Install root for the given target.
  pub fn install_dir(&self, target: Target) -> &Path {
    match target {
      Target::Device => &self.device_install_dir,
      Target::Host => &self.host_install_dir,
    }
  }

  /// Intermediates directory of one module variant
  /// (`<out_dir>/<module dir>/<name>/<variant>`).
  pub fn module_out_dir(&self, module_dir: &Path, name: &str, target: Target) -> PathBuf {
    self.out_dir.join(module_dir).join(name).join(target.variant_dir())
  }
}

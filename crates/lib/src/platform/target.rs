use std::fmt;

use serde::{Deserialize, Serialize};

/// The platform a module variant is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
  /// Runs on the device; compiled classes are dexed.
  Device,
  /// Runs on the build host.
  Host,
}

impl Target {
  pub const ALL: [Target; 2] = [Target::Device, Target::Host];

  /// Returns the lowercase string identifier for this target
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Device => "device",
      Self::Host => "host",
    }
  }

  /// Directory name used for this variant's intermediates.
  pub fn variant_dir(&self) -> &'static str {
    match self {
      Self::Device => "android_common",
      Self::Host => "linux_glibc_common",
    }
  }

  pub fn is_device(&self) -> bool {
    matches!(self, Self::Device)
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

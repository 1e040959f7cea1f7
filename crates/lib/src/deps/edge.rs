use std::fmt;

use serde::{Deserialize, Serialize};

/// How a dependency is folded into the depending module's build inputs.
///
/// Kinds are compared by value; two edges to the same module with different
/// kinds are different edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepKind {
  /// On the compile classpath.
  Lib,
  /// On the classpath and merged into the consumer's jar.
  StaticLib,
  /// Replaces the default boot classpath.
  BootClasspath,
  /// One-off edge from `framework` to the generated sources of `framework-res`.
  FrameworkRes,
  /// A versioned sdk prebuilt: boot classpath plus optional preprocessed aidl.
  Sdk,
  /// Inherits properties from a defaults module. Administrative only.
  Defaults,
  /// References generated sources named in `srcs`. Administrative only.
  Source,
}

impl DepKind {
  /// Administrative edges order modules but may reach peers without the
  /// java dependency capability.
  pub fn is_administrative(&self) -> bool {
    matches!(self, DepKind::Defaults | DepKind::Source)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      DepKind::Lib => "javalib",
      DepKind::StaticLib => "staticlib",
      DepKind::BootClasspath => "bootclasspath",
      DepKind::FrameworkRes => "framework-res",
      DepKind::Sdk => "sdk",
      DepKind::Defaults => "defaults",
      DepKind::Source => "source",
    }
  }
}

impl fmt::Display for DepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A declared dependency: `from` needs `to` as `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepEdge {
  pub from: String,
  pub to: String,
  pub kind: DepKind,
}

impl DepEdge {
  pub fn new(from: impl Into<String>, to: impl Into<String>, kind: DepKind) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
      kind,
    }
  }
}

impl fmt::Display for DepEdge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -[{}]-> {}", self.from, self.kind, self.to)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_defaults_and_source_are_administrative() {
    let administrative: Vec<_> = [
      DepKind::Lib,
      DepKind::StaticLib,
      DepKind::BootClasspath,
      DepKind::FrameworkRes,
      DepKind::Sdk,
      DepKind::Defaults,
      DepKind::Source,
    ]
    .into_iter()
    .filter(DepKind::is_administrative)
    .collect();
    assert_eq!(administrative, vec![DepKind::Defaults, DepKind::Source]);
  }

  #[test]
  fn edges_differ_by_kind() {
    assert_ne!(
      DepEdge::new("a", "b", DepKind::Lib),
      DepEdge::new("a", "b", DepKind::StaticLib)
    );
  }
}

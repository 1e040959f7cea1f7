//! Planning results.
//!
//! A [`ModulePlan`] is everything one module variant publishes: the transforms
//! the executor should run and the artifacts dependents consume. A [`Plan`] is
//! the outcome of a whole run, including modules that failed or were skipped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::VariantKind;
use crate::deps::{Dependency, Peer, SdkDependency};
use crate::platform::Target;
use crate::transform::{ArtifactPath, Transform};
use crate::util::hash::{HashError, Hashable, ObjectHash};

/// The published result of planning one module variant.
///
/// Write-once: the graph builds it in one `generate` call and only ever hands
/// out shared references afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePlan {
  pub name: String,
  pub target: Target,
  pub kind: VariantKind,
  /// Transforms in the order the pipeline recorded them.
  pub transforms: Vec<Transform>,
  /// Jars dependents put on their classpath.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub classpath_files: Vec<ArtifactPath>,
  /// The final artifact of the module.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output_file: Option<ArtifactPath>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub install_file: Option<ArtifactPath>,
  /// Installed wrapper script of a binary.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub binary_file: Option<ArtifactPath>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub aidl_include_dirs: Vec<PathBuf>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub aidl_preprocessed: Option<ArtifactPath>,
  /// Artifacts built by a plain `checkbuild` even if nothing consumes them.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub checkbuild: Vec<ArtifactPath>,
}

impl ModulePlan {
  pub fn new(name: impl Into<String>, target: Target, kind: VariantKind) -> Self {
    Self {
      name: name.into(),
      target,
      kind,
      transforms: Vec::new(),
      classpath_files: Vec::new(),
      output_file: None,
      install_file: None,
      binary_file: None,
      aidl_include_dirs: Vec::new(),
      aidl_preprocessed: None,
      checkbuild: Vec::new(),
    }
  }
}

impl Dependency for ModulePlan {
  fn classpath_files(&self) -> &[ArtifactPath] {
    &self.classpath_files
  }

  fn aidl_include_dirs(&self) -> &[PathBuf] {
    &self.aidl_include_dirs
  }
}

impl SdkDependency for ModulePlan {
  fn aidl_preprocessed(&self) -> Option<&ArtifactPath> {
    self.aidl_preprocessed.as_ref()
  }
}

impl Peer for ModulePlan {
  fn as_dependency(&self) -> Option<&dyn Dependency> {
    match self.kind {
      VariantKind::Defaults => None,
      _ => Some(self),
    }
  }

  fn as_sdk_dependency(&self) -> Option<&dyn SdkDependency> {
    match self.kind {
      VariantKind::SdkPrebuilt => Some(self),
      _ => None,
    }
  }
}

/// A module variant that produced no plan, and why.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleFailure {
  pub name: String,
  pub target: Target,
  pub message: String,
}

/// The result of planning a whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
  /// Planned variants, sorted by name then target.
  pub modules: Vec<ModulePlan>,
  /// Variants whose own configuration is broken.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub failed: Vec<ModuleFailure>,
  /// Variants not planned because a dependency failed or was skipped.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub skipped: Vec<ModuleFailure>,
}

impl Hashable for Plan {}

impl Plan {
  /// Sort every list so the plan does not depend on planning order.
  pub(crate) fn normalize(&mut self) {
    self.modules.sort_by(|a, b| (&a.name, a.target).cmp(&(&b.name, b.target)));
    self.failed.sort();
    self.skipped.sort();
  }

  pub fn module(&self, name: &str, target: Target) -> Option<&ModulePlan> {
    self.modules.iter().find(|m| m.name == name && m.target == target)
  }

  pub fn failure(&self, name: &str, target: Target) -> Option<&ModuleFailure> {
    self.failed.iter().find(|m| m.name == name && m.target == target)
  }

  pub fn is_success(&self) -> bool {
    self.failed.is_empty() && self.skipped.is_empty()
  }

  pub fn transform_count(&self) -> usize {
    self.modules.iter().map(|m| m.transforms.len()).sum()
  }

  /// Content hash of the serialized plan.
  pub fn hash(&self) -> Result<ObjectHash, HashError> {
    self.compute_hash()
  }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::deps::{Dependency, Peer, SdkDependency, SourceFileGenerator};
use crate::transform::ArtifactPath;

/// A dependency target provided from outside the blueprint.
///
/// Stands in for modules of other types (resource packages, generators,
/// platform prebuilts) that dependents only see through their capabilities.
/// Capabilities are opted into explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPeer {
  /// Exposes the java dependency capability.
  #[serde(default)]
  pub java: bool,
  /// Exposes the sdk capability. Implies `java`.
  #[serde(default)]
  pub sdk: bool,
  #[serde(default)]
  pub classpath_files: Vec<ArtifactPath>,
  #[serde(default)]
  pub aidl_include_dirs: Vec<PathBuf>,
  #[serde(default)]
  pub aidl_preprocessed: Option<ArtifactPath>,
  /// Source list consumed by `framework` over a framework-res edge.
  #[serde(default)]
  pub generated_src_list: Option<ArtifactPath>,
  /// Present when the peer generates sources.
  #[serde(default)]
  pub generated_sources: Option<Vec<ArtifactPath>>,
}

impl ExternalPeer {
  /// A plain java library contributing `jars`.
  pub fn java(jars: Vec<ArtifactPath>) -> Self {
    Self {
      java: true,
      classpath_files: jars,
      ..Default::default()
    }
  }

  /// An sdk prebuilt.
  pub fn sdk(jars: Vec<ArtifactPath>, aidl_preprocessed: Option<ArtifactPath>) -> Self {
    Self {
      sdk: true,
      aidl_preprocessed,
      ..Self::java(jars)
    }
  }

  /// A source generator without any java capability.
  pub fn generator(sources: Vec<ArtifactPath>) -> Self {
    Self {
      generated_sources: Some(sources),
      ..Default::default()
    }
  }

  pub fn with_generated_src_list(mut self, list: ArtifactPath) -> Self {
    self.generated_src_list = Some(list);
    self
  }
}

impl Dependency for ExternalPeer {
  fn classpath_files(&self) -> &[ArtifactPath] {
    &self.classpath_files
  }

  fn aidl_include_dirs(&self) -> &[PathBuf] {
    &self.aidl_include_dirs
  }

  fn generated_src_list(&self) -> Option<&ArtifactPath> {
    self.generated_src_list.as_ref()
  }
}

impl SdkDependency for ExternalPeer {
  fn aidl_preprocessed(&self) -> Option<&ArtifactPath> {
    self.aidl_preprocessed.as_ref()
  }
}

impl SourceFileGenerator for ExternalPeer {
  fn generated_source_files(&self) -> &[ArtifactPath] {
    self.generated_sources.as_deref().unwrap_or_default()
  }
}

impl Peer for ExternalPeer {
  fn as_dependency(&self) -> Option<&dyn Dependency> {
    (self.java || self.sdk).then_some(self as &dyn Dependency)
  }

  fn as_sdk_dependency(&self) -> Option<&dyn SdkDependency> {
    self.sdk.then_some(self as &dyn SdkDependency)
  }

  fn as_source_generator(&self) -> Option<&dyn SourceFileGenerator> {
    self.generated_sources.is_some().then_some(self as &dyn SourceFileGenerator)
  }
}

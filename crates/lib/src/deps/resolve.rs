//! Dependency resolution.
//!
//! Folds resolved peers into the inputs a compile needs. Peers are queried for
//! capabilities once, here; a missing capability is a typed error instead of a
//! failed downcast somewhere in the pipeline.

use std::path::PathBuf;

use tracing::debug;

use super::edge::DepKind;
use crate::consts::FRAMEWORK_MODULE;
use crate::error::{InternalFault, ModuleError, PlanError};
use crate::transform::ArtifactPath;
use crate::util::UniqueVec;

/// A peer that can be compiled against.
pub trait Dependency: Sync {
  /// Jars contributed to a dependent's classpath.
  fn classpath_files(&self) -> &[ArtifactPath];

  /// Aidl include directories exported to dependents.
  fn aidl_include_dirs(&self) -> &[PathBuf];

  /// File list of sources generated by this peer for `framework`.
  fn generated_src_list(&self) -> Option<&ArtifactPath> {
    None
  }
}

/// A versioned sdk prebuilt.
pub trait SdkDependency: Dependency {
  fn aidl_preprocessed(&self) -> Option<&ArtifactPath>;
}

/// A peer that produces source files for its dependents to compile.
pub trait SourceFileGenerator: Sync {
  fn generated_source_files(&self) -> &[ArtifactPath];
}

/// A resolved dependency target, exposing whichever capabilities it has.
pub trait Peer: Sync {
  fn as_dependency(&self) -> Option<&dyn Dependency> {
    None
  }

  fn as_sdk_dependency(&self) -> Option<&dyn SdkDependency> {
    None
  }

  fn as_source_generator(&self) -> Option<&dyn SourceFileGenerator> {
    None
  }
}

/// One declared edge after the graph matched it to a peer.
#[derive(Clone, Copy)]
pub struct ResolvedDep<'a> {
  pub name: &'a str,
  pub kind: DepKind,
  pub peer: &'a dyn Peer,
}

impl std::fmt::Debug for ResolvedDep<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ResolvedDep")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .finish_non_exhaustive()
  }
}

/// Build inputs aggregated from a module's dependencies.
///
/// Every list keeps edge declaration order and drops repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepInputs {
  pub classpath: Vec<ArtifactPath>,
  pub bootclasspath: Vec<ArtifactPath>,
  /// Jars merged into this module's output. Always also on `classpath`.
  pub static_jars: Vec<ArtifactPath>,
  pub aidl_include_dirs: Vec<PathBuf>,
  /// Source file lists passed straight to javac.
  pub src_file_lists: Vec<ArtifactPath>,
  pub aidl_preprocessed: Option<ArtifactPath>,
  /// Sources produced by generator peers.
  pub generated_sources: Vec<ArtifactPath>,
}

/// Fold `deps` into the build inputs of `module`.
///
/// Configuration problems fail the module; an edge kind that should never
/// reach the classpath fold is an internal fault.
pub fn collect_deps(module: &str, deps: &[ResolvedDep<'_>]) -> Result<DepInputs, PlanError> {
  let mut classpath = UniqueVec::new();
  let mut bootclasspath = UniqueVec::new();
  let mut static_jars = UniqueVec::new();
  let mut aidl_include_dirs = UniqueVec::new();
  let mut src_file_lists = UniqueVec::new();
  let mut generated_sources = UniqueVec::new();
  let mut aidl_preprocessed: Option<ArtifactPath> = None;

  for resolved in deps {
    if let Some(generator) = resolved.peer.as_source_generator() {
      generated_sources.extend_from_slice(generator.generated_source_files());
    }

    // Defaults and source edges carry nothing onto the classpath, whatever
    // else the peer can do.
    if resolved.kind.is_administrative() {
      continue;
    }

    let Some(dep) = resolved.peer.as_dependency() else {
      return Err(
        ModuleError::NotJavaDependency {
          module: module.to_string(),
          dep: resolved.name.to_string(),
        }
        .into(),
      );
    };

    match resolved.kind {
      DepKind::BootClasspath => bootclasspath.extend_from_slice(dep.classpath_files()),
      DepKind::Lib => classpath.extend_from_slice(dep.classpath_files()),
      DepKind::StaticLib => {
        classpath.extend_from_slice(dep.classpath_files());
        static_jars.extend_from_slice(dep.classpath_files());
      }
      DepKind::FrameworkRes => {
        if module == FRAMEWORK_MODULE {
          let list = dep.generated_src_list().ok_or_else(|| ModuleError::MissingGeneratedSources {
            module: module.to_string(),
            dep: resolved.name.to_string(),
          })?;
          src_file_lists.push(list.clone());
        } else {
          debug!(module = %module, dep = %resolved.name, "ignoring framework-res edge");
        }
      }
      DepKind::Sdk => {
        let sdk = resolved.peer.as_sdk_dependency().ok_or_else(|| ModuleError::NotSdkDependency {
          module: module.to_string(),
          dep: resolved.name.to_string(),
        })?;
        bootclasspath.extend_from_slice(sdk.classpath_files());
        if let Some(preprocessed) = sdk.aidl_preprocessed() {
          if let Some(first) = &aidl_preprocessed {
            return Err(
              ModuleError::DuplicateAidlPreprocessed {
                module: module.to_string(),
                first: first.to_string(),
                second: preprocessed.to_string(),
              }
              .into(),
            );
          }
          aidl_preprocessed = Some(preprocessed.clone());
        }
      }
      DepKind::Defaults | DepKind::Source => {
        return Err(
          InternalFault::UnknownDependency {
            module: module.to_string(),
            dep: resolved.name.to_string(),
            kind: resolved.kind,
          }
          .into(),
        );
      }
    }

    aidl_include_dirs.extend_from_slice(dep.aidl_include_dirs());
  }

  debug!(
    module = %module,
    classpath = classpath.len(),
    bootclasspath = bootclasspath.len(),
    static_jars = static_jars.len(),
    "collected dependencies"
  );
  Ok(DepInputs {
    classpath: classpath.into_vec(),
    bootclasspath: bootclasspath.into_vec(),
    static_jars: static_jars.into_vec(),
    aidl_include_dirs: aidl_include_dirs.into_vec(),
    src_file_lists: src_file_lists.into_vec(),
    aidl_preprocessed,
    generated_sources: generated_sources.into_vec(),
  })
}

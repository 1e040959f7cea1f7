//! Error types for dependency resolution and planning.
//!
//! Errors come in two severities. [`ModuleError`]s are configuration problems
//! attached to a single module variant: the variant produces no plan, and
//! modules that depend on it are skipped, but unrelated modules still plan.
//! [`InternalFault`]s mean the planner itself is inconsistent and abort the
//! whole run. [`PlanError`] carries both plus run-level failures such as
//! dependency cycles.

use std::path::PathBuf;

use thiserror::Error;

use crate::deps::DepKind;
use crate::transform::Stage;

/// A user-facing configuration error, fatal to one module variant only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
  /// A peer without the java dependency capability was reached through an edge
  /// that requires it.
  #[error("module {module:?} depends on non-java module {dep:?}")]
  NotJavaDependency { module: String, dep: String },

  /// An `sdk` edge reached a peer that does not expose the sdk capability.
  #[error("module {module:?} depends on {dep:?} as an sdk, but it is not an sdk prebuilt")]
  NotSdkDependency { module: String, dep: String },

  /// Two sdk dependencies both provide a preprocessed aidl file.
  #[error("module {module:?} has multiple dependencies with preprocessed aidls:\n {first}\n {second}")]
  DuplicateAidlPreprocessed {
    module: String,
    first: String,
    second: String,
  },

  /// A `:name` source reference names a module that generates no sources.
  #[error("module {module:?} references {dep:?} in srcs, but it is not a source generator")]
  NotSourceGenerator { module: String, dep: String },

  /// `framework` reached a `framework-res` peer that exposes no generated source list.
  #[error("module {module:?} expects generated sources from {dep:?}, but it provides none")]
  MissingGeneratedSources { module: String, dep: String },

  /// A declared dependency names a module that does not exist for this target.
  #[error("module {module:?} depends on undefined module {dep:?}")]
  MissingDependency { module: String, dep: String },

  /// A module source path consumed by a stage does not exist.
  #[error("module {module:?}: {stage} input {path:?} does not exist")]
  MissingSource {
    module: String,
    stage: Stage,
    path: PathBuf,
  },

  /// A binary was declared without a wrapper script.
  #[error("binary module {module:?} has no wrapper script")]
  MissingWrapper { module: String },

  /// A stage could not be described from the inputs it was given.
  #[error("module {module:?}: {stage} failed: {message}")]
  StageFailed {
    module: String,
    stage: Stage,
    message: String,
  },
}

impl ModuleError {
  pub fn stage_failed(module: impl Into<String>, stage: Stage, message: impl ToString) -> Self {
    Self::StageFailed {
      module: module.into(),
      stage,
      message: message.to_string(),
    }
  }

  pub fn missing_source(module: impl Into<String>, stage: Stage, path: impl Into<PathBuf>) -> Self {
    Self::MissingSource {
      module: module.into(),
      stage,
      path: path.into(),
    }
  }
}

/// A planner consistency bug. Never caused by user configuration alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalFault {
  /// The resolver was handed an edge kind it does not fold into build inputs.
  #[error("unknown dependency {dep:?} ({kind}) for {module:?}")]
  UnknownDependency { module: String, dep: String, kind: DepKind },

  /// A dependency from an earlier wave was neither planned nor blocked.
  #[error("dependency {dep:?} of {module:?} was reached before it was planned")]
  UnplannedDependency { module: String, dep: String },
}

/// Errors produced while building the module graph or planning it.
#[derive(Debug, Error)]
pub enum PlanError {
  #[error(transparent)]
  Module(#[from] ModuleError),

  #[error("internal planner fault: {0}")]
  Internal(#[from] InternalFault),

  /// The same module name was declared twice for one target.
  #[error("module {name:?} is defined more than once")]
  DuplicateModule { name: String },

  /// A module lists a defaults module that does not exist or is not a defaults module.
  #[error("module {module:?} references unknown defaults {defaults:?}")]
  UnknownDefaults { module: String, defaults: String },

  /// Defaults modules inherit from each other in a loop.
  #[error("defaults cycle through {0:?}")]
  DefaultsCycle(String),

  /// The dependency graph contains a cycle.
  #[error("dependency cycle detected involving {0:?}")]
  CycleDetected(String),

  #[error("failed to read blueprint {path}: {source}")]
  ReadBlueprint {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse blueprint: {0}")]
  ParseBlueprint(#[from] serde_json::Error),
}

impl PlanError {
  /// Whether this error must abort the entire planning run.
  pub fn is_internal(&self) -> bool {
    matches!(self, PlanError::Internal(_))
  }

  /// The module-level error, if this is one.
  pub fn as_module_error(&self) -> Option<&ModuleError> {
    match self {
      PlanError::Module(e) => Some(e),
      _ => None,
    }
  }
}

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::flags::JavacArgs;

/// A file the executor produces or consumes. Transforms are ordered by the
/// artifacts they share, so this is the unit of scheduling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactPath(PathBuf);

impl ArtifactPath {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self(path.into())
  }
}

impl fmt::Display for ArtifactPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

impl From<PathBuf> for ArtifactPath {
  fn from(path: PathBuf) -> Self {
    Self(path)
  }
}

impl From<&str> for ArtifactPath {
  fn from(path: &str) -> Self {
    Self(PathBuf::from(path))
  }
}

/// Pipeline stages, in the order a module runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  Sources,
  Compile,
  ErrorProne,
  Resources,
  Combine,
  JarJar,
  Dex,
  DexJar,
  Install,
  InstallWrapper,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Sources => "sources",
      Self::Compile => "compile",
      Self::ErrorProne => "errorprone",
      Self::Resources => "resources",
      Self::Combine => "combine",
      Self::JarJar => "jarjar",
      Self::Dex => "dex",
      Self::DexJar => "dex jar",
      Self::Install => "install",
      Self::InstallWrapper => "install wrapper",
    };
    write!(f, "{}", s)
  }
}

/// The tool invocation a transform describes, with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
  /// Compile java sources into a classes jar.
  Javac(JavacArgs),
  /// Same compile under the stricter analyzer; the output is only a marker.
  ErrorProne(JavacArgs),
  /// Package resource directories and an optional manifest into a jar.
  ResourceJar {
    resource_dirs: Vec<PathBuf>,
    manifest: Option<PathBuf>,
  },
  /// Merge several jars into one.
  CombineJars,
  /// Rename packages inside a jar.
  JarJar { rules: PathBuf },
  /// Convert a classes jar to dex.
  Dex { flags: Vec<String> },
  /// Package dex output together with resources into the installable jar.
  DexToJavaLib { resource_dirs: Vec<PathBuf> },
  /// Copy a file into the install tree.
  Install,
  /// Copy an executable into the install tree.
  InstallExecutable,
}

impl Rule {
  pub fn stage(&self) -> Stage {
    match self {
      Rule::Javac(_) => Stage::Compile,
      Rule::ErrorProne(_) => Stage::ErrorProne,
      Rule::ResourceJar { .. } => Stage::Resources,
      Rule::CombineJars => Stage::Combine,
      Rule::JarJar { .. } => Stage::JarJar,
      Rule::Dex { .. } => Stage::Dex,
      Rule::DexToJavaLib { .. } => Stage::DexJar,
      Rule::Install => Stage::Install,
      Rule::InstallExecutable => Stage::InstallWrapper,
    }
  }

  /// Whether the rule cannot run without at least one explicit input.
  fn requires_inputs(&self) -> bool {
    !matches!(self, Rule::ResourceJar { .. })
  }
}

/// A single artifact transformation handed to the executor.
///
/// `inputs` are consumed by the tool, `implicits` only trigger a rebuild when
/// they change, and `order_only` entries must exist before the transform runs
/// but are not read by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
  #[serde(flatten)]
  pub rule: Rule,
  pub inputs: Vec<ArtifactPath>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub implicits: Vec<ArtifactPath>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub order_only: Vec<ArtifactPath>,
  pub output: ArtifactPath,
}

impl Transform {
  pub fn new(rule: Rule, output: ArtifactPath) -> Self {
    Self {
      rule,
      inputs: Vec::new(),
      implicits: Vec::new(),
      order_only: Vec::new(),
      output,
    }
  }

  pub fn with_inputs(mut self, inputs: Vec<ArtifactPath>) -> Self {
    self.inputs = inputs;
    self
  }

  pub fn with_implicits(mut self, implicits: Vec<ArtifactPath>) -> Self {
    self.implicits = implicits;
    self
  }

  pub fn stage(&self) -> Stage {
    self.rule.stage()
  }

  /// Every artifact this transform waits on.
  pub fn dependencies(&self) -> impl Iterator<Item = &ArtifactPath> {
    self.inputs.iter().chain(&self.implicits).chain(&self.order_only)
  }

  /// Why this transform cannot be described, if it cannot.
  pub(crate) fn validate(&self) -> Result<(), String> {
    if self.rule.requires_inputs() && self.inputs.is_empty() {
      return Err("no inputs".to_string());
    }
    if self.dependencies().any(|d| d == &self.output) {
      return Err(format!("{} depends on itself", self.output));
    }
    Ok(())
  }
}

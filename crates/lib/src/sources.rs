//! Source tree access.
//!
//! The planner never reads source files; it only needs to know which files a
//! module's patterns expand to and whether a module-relative path exists. Both
//! questions go through [`SourceTree`] so planning can run against the real
//! filesystem or an in-memory file set.
//!
//! Patterns use glob syntax relative to the module directory. `*` does not
//! cross `/`; `**` matches any number of directories. A pattern without glob
//! characters names a single file, which must exist.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use thiserror::Error;
use walkdir::WalkDir;

use crate::util::UniqueVec;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
  #[error("invalid source pattern {pattern:?}: {message}")]
  InvalidPattern { pattern: String, message: String },

  #[error("source path {0:?} does not exist")]
  Missing(PathBuf),

  #[error("failed to walk {path:?}: {message}")]
  Walk { path: PathBuf, message: String },
}

/// Read-only view of the source tree, shared across planning threads.
pub trait SourceTree: Sync {
  /// Whether `path` (relative to the source root) is an existing file or directory.
  fn exists(&self, path: &Path) -> bool;

  /// Expand `patterns` under `dir`, dropping anything matched by `excludes`.
  ///
  /// Results keep pattern order, sorted within each pattern, without duplicates.
  fn expand(&self, dir: &Path, patterns: &[String], excludes: &[String]) -> Result<Vec<PathBuf>, SourceError>;
}

fn match_options() -> MatchOptions {
  MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
  }
}

pub(crate) fn is_glob(pattern: &str) -> bool {
  pattern.contains(['*', '?', '['])
}

fn compile(dir: &Path, pattern: &str) -> Result<Pattern, SourceError> {
  let full = dir.join(pattern);
  Pattern::new(&full.to_string_lossy()).map_err(|e| SourceError::InvalidPattern {
    pattern: pattern.to_string(),
    message: e.to_string(),
  })
}

/// Leading directory of a glob pattern that contains no glob characters.
fn literal_prefix(pattern: &Path) -> PathBuf {
  let mut prefix = PathBuf::new();
  for component in pattern.components() {
    if let Component::Normal(part) = component
      && is_glob(&part.to_string_lossy())
    {
      break;
    }
    prefix.push(component);
  }
  prefix
}

struct Excludes {
  patterns: Vec<Pattern>,
}

impl Excludes {
  fn new(dir: &Path, excludes: &[String]) -> Result<Self, SourceError> {
    let patterns = excludes.iter().map(|e| compile(dir, e)).collect::<Result<_, _>>()?;
    Ok(Self { patterns })
  }

  fn excluded(&self, path: &Path) -> bool {
    self.patterns.iter().any(|p| p.matches_path_with(path, match_options()))
  }
}

/// Shared expansion logic; `candidates` lists the files under a directory.
fn expand_with<F>(
  dir: &Path,
  patterns: &[String],
  excludes: &[String],
  exists: impl Fn(&Path) -> bool,
  candidates: F,
) -> Result<Vec<PathBuf>, SourceError>
where
  F: Fn(&Path) -> Result<Vec<PathBuf>, SourceError>,
{
  let excludes = Excludes::new(dir, excludes)?;
  let mut out = UniqueVec::new();

  for pattern in patterns {
    if is_glob(pattern) {
      let compiled = compile(dir, pattern)?;
      let base = literal_prefix(&dir.join(pattern));
      for file in candidates(&base)? {
        if compiled.matches_path_with(&file, match_options()) && !excludes.excluded(&file) {
          out.push(file);
        }
      }
    } else {
      let file = dir.join(pattern);
      if !exists(&file) {
        return Err(SourceError::Missing(file));
      }
      if !excludes.excluded(&file) {
        out.push(file);
      }
    }
  }

  Ok(out.into_vec())
}

/// A source tree backed by an explicit set of file paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceTree {
  files: BTreeSet<PathBuf>,
}

impl MemorySourceTree {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
    self.files.insert(path.into());
    self
  }

  pub fn with_files<I, P>(mut self, paths: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    self.files.extend(paths.into_iter().map(Into::into));
    self
  }
}

impl SourceTree for MemorySourceTree {
  fn exists(&self, path: &Path) -> bool {
    self.files.iter().any(|f| f.starts_with(path))
  }

  fn expand(&self, dir: &Path, patterns: &[String], excludes: &[String]) -> Result<Vec<PathBuf>, SourceError> {
    expand_with(
      dir,
      patterns,
      excludes,
      |p| self.exists(p),
      |base| Ok(self.files.iter().filter(|f| f.starts_with(base)).cloned().collect()),
    )
  }
}

/// A source tree rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsSourceTree {
  root: PathBuf,
}

impl FsSourceTree {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn walk(&self, base: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let start = self.root.join(base);
    if !start.is_dir() {
      return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(&start).sort_by_file_name() {
      let entry = entry.map_err(|e| SourceError::Walk {
        path: start.clone(),
        message: e.to_string(),
      })?;
      if !entry.file_type().is_file() {
        continue;
      }
      if let Ok(relative) = entry.path().strip_prefix(&self.root) {
        files.push(relative.to_path_buf());
      }
    }
    Ok(files)
  }
}

impl SourceTree for FsSourceTree {
  fn exists(&self, path: &Path) -> bool {
    self.root.join(path).exists()
  }

  fn expand(&self, dir: &Path, patterns: &[String], excludes: &[String]) -> Result<Vec<PathBuf>, SourceError> {
    expand_with(dir, patterns, excludes, |p| self.exists(p), |base| self.walk(base))
  }
}

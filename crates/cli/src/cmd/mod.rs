mod deps;
mod plan;
mod waves;

pub use deps::cmd_deps;
pub use plan::cmd_plan;
pub use waves::cmd_waves;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use jplan_lib::config::Blueprint;
use jplan_lib::graph::{ExternalPeer, ModuleGraph};
use jplan_lib::platform::Target;

/// One entry of an externals file.
#[derive(Debug, Deserialize)]
struct ExternalDecl {
  name: String,
  target: Target,
  #[serde(flatten)]
  peer: ExternalPeer,
}

/// Read a blueprint and build its module graph.
pub(crate) fn load_graph(path: &Path) -> Result<ModuleGraph> {
  let blueprint =
    Blueprint::from_file(path).with_context(|| format!("Failed to load blueprint: {}", path.display()))?;
  ModuleGraph::new(&blueprint).with_context(|| format!("Failed to build module graph: {}", path.display()))
}

/// Register every peer listed in an externals file.
pub(crate) fn load_externals(graph: &mut ModuleGraph, path: &Path) -> Result<usize> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read externals: {}", path.display()))?;
  let decls: Vec<ExternalDecl> =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse externals: {}", path.display()))?;

  let count = decls.len();
  for decl in decls {
    graph
      .add_external(&decl.name, decl.target, decl.peer)
      .with_context(|| format!("Failed to register external {}", decl.name))?;
  }
  Ok(count)
}

//! Implementation of the `jplan deps` command.

use std::path::Path;

use anyhow::{Result, bail};

use jplan_lib::platform::Target;

use crate::output::{print_info, symbols};

pub fn cmd_deps(blueprint: &Path, module: &str, host: bool) -> Result<()> {
  let graph = super::load_graph(blueprint)?;
  let target = if host { Target::Host } else { Target::Device };

  let Some(edges) = graph.declared_deps(module, target) else {
    bail!("No {} variant of module {:?} in {}", target, module, blueprint.display());
  };

  if edges.is_empty() {
    print_info(&format!("{} ({}) declares no dependencies", module, target));
    return Ok(());
  }

  for edge in edges {
    println!("{} {} {}", edge.kind, symbols::ARROW, edge.to);
  }
  Ok(())
}

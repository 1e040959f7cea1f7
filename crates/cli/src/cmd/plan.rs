//! Implementation of the `jplan plan` command.
//!
//! Plans every module of a blueprint against the source tree on disk and
//! prints the transforms each module would run.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use jplan_lib::env::EnvOverrides;
use jplan_lib::plan::{ModulePlan, Plan};
use jplan_lib::sources::FsSourceTree;

use crate::output::{OutputFormat, print_error, print_json, print_stat, print_success, print_warning, symbols, truncate_hash};

#[derive(Serialize)]
struct PlanReport<'a> {
  hash: &'a str,
  plan: &'a Plan,
}

pub fn cmd_plan(blueprint: &Path, root: Option<&Path>, externals: Option<&Path>, format: OutputFormat) -> Result<()> {
  let mut graph = super::load_graph(blueprint)?;
  if let Some(externals) = externals {
    let count = super::load_externals(&mut graph, externals)?;
    debug!(count, path = %externals.display(), "registered externals");
  }

  let root = match root {
    Some(root) => root.to_path_buf(),
    None => blueprint.parent().map(Path::to_path_buf).unwrap_or_default(),
  };
  let sources = FsSourceTree::new(&root);
  let env = EnvOverrides::from_env();

  let plan = graph
    .plan(&sources, &env)
    .with_context(|| format!("Failed to plan {}", blueprint.display()))?;
  let hash = plan.hash().context("Failed to compute plan hash")?;

  if format.is_json() {
    print_json(&PlanReport {
      hash: &hash.0,
      plan: &plan,
    })?;
  } else {
    print_text(&plan, &hash.0);
  }

  if !plan.is_success() {
    bail!("{} module(s) failed to plan", plan.failed.len());
  }
  Ok(())
}

fn print_text(plan: &Plan, hash: &str) {
  for module in &plan.modules {
    print_module(module);
  }

  for failure in &plan.failed {
    print_error(&format!("{} ({}): {}", failure.name, failure.target, failure.message));
  }
  for skipped in &plan.skipped {
    print_warning(&format!("{} ({}) skipped: {}", skipped.name, skipped.target, skipped.message));
  }

  println!();
  if plan.is_success() {
    print_success(&format!("Plan: {}", truncate_hash(hash)));
  } else {
    print_warning(&format!("Partial plan: {}", truncate_hash(hash)));
  }
  print_stat("Modules", &plan.modules.len().to_string());
  print_stat("Transforms", &plan.transform_count().to_string());
  print_stat("Failed", &plan.failed.len().to_string());
  print_stat("Skipped", &plan.skipped.len().to_string());
}

fn print_module(module: &ModulePlan) {
  println!("{} ({}, {})", module.name, module.target, module.kind);
  for transform in &module.transforms {
    println!("  {} {} {}", transform.stage(), symbols::ARROW, transform.output);
  }
  if let Some(output) = &module.output_file {
    println!("  output: {}", output);
  }
}

//! Shared helpers for library integration tests.

use jplan_lib::config::Blueprint;
use jplan_lib::env::EnvOverrides;
use jplan_lib::graph::{ExternalPeer, ModuleGraph};
use jplan_lib::plan::{ModulePlan, Plan};
use jplan_lib::platform::Target;
use jplan_lib::sources::SourceTree;
use jplan_lib::transform::{ArtifactPath, Stage};

/// Parse a blueprint from JSON, panicking on error.
pub fn blueprint(json: &str) -> Blueprint {
  Blueprint::from_json(json).unwrap_or_else(|e| panic!("invalid test blueprint: {}", e))
}

/// Register the platform runtime libraries a device module depends on by default.
pub fn add_platform_runtime(graph: &mut ModuleGraph) {
  for name in ["core-oj", "core-libart", "ext", "framework", "okhttp"] {
    graph
      .add_external(
        name,
        Target::Device,
        ExternalPeer::java(vec![ArtifactPath::from(format!("out/{}/classes.jar", name).as_str())]),
      )
      .unwrap();
  }
}

pub fn plan_with(graph: &ModuleGraph, sources: &dyn SourceTree, env: EnvOverrides) -> Plan {
  graph.plan(sources, &env).unwrap()
}

pub fn module<'a>(plan: &'a Plan, name: &str, target: Target) -> &'a ModulePlan {
  plan
    .module(name, target)
    .unwrap_or_else(|| panic!("{} ({}) was not planned: {:?}", name, target, plan.failed))
}

pub fn stages(plan: &ModulePlan) -> Vec<Stage> {
  plan.transforms.iter().map(|t| t.stage()).collect()
}

pub fn jar(path: &str) -> ArtifactPath {
  ArtifactPath::from(path)
}

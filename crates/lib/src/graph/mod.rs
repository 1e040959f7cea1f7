//! The module graph.
//!
//! Expands blueprint declarations into target variants, resolves each declared
//! edge to the same-named variant of the same target (or a registered
//! [`ExternalPeer`]), and plans variants in dependency waves. Variants within a
//! wave are independent and plan in parallel.

mod external;

pub use external::ExternalPeer;

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Blueprint, apply_defaults};
use crate::deps::{DepEdge, DepKind, Peer, ResolvedDep, collect_deps};
use crate::env::EnvOverrides;
use crate::error::{InternalFault, ModuleError, PlanError};
use crate::module::{Module, ModuleContext};
use crate::plan::{ModuleFailure, ModulePlan, Plan};
use crate::platform::{PlatformConfig, Target};
use crate::sources::SourceTree;

/// Identifies one module variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariantId {
  pub name: String,
  pub target: Target,
}

impl VariantId {
  pub fn new(name: impl Into<String>, target: Target) -> Self {
    Self {
      name: name.into(),
      target,
    }
  }
}

impl fmt::Display for VariantId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.target)
  }
}

/// A declared edge and the node it resolved to, if any.
#[derive(Debug, Clone)]
struct DeclaredDep {
  edge: DepEdge,
  node: Option<NodeIndex>,
}

#[derive(Debug)]
enum Node {
  Module { module: Module, deps: Vec<DeclaredDep> },
  External { id: VariantId, peer: ExternalPeer },
}

impl Node {
  fn id(&self) -> VariantId {
    match self {
      Node::Module { module, .. } => VariantId::new(module.name(), module.target()),
      Node::External { id, .. } => id.clone(),
    }
  }
}

/// Result of planning a single variant.
enum Outcome {
  Planned(ModulePlan),
  Failed(ModuleError),
  Skipped(String),
}

pub struct ModuleGraph {
  platform: PlatformConfig,
  /// Edges point from dependency to dependent.
  graph: DiGraph<Node, DepKind>,
  index: HashMap<VariantId, NodeIndex>,
}

impl ModuleGraph {
  /// Build the graph for every module in `blueprint`.
  ///
  /// Edges to names the blueprint does not define stay unresolved until an
  /// external peer is registered for them; if none is, only the declaring
  /// variant fails.
  pub fn new(blueprint: &Blueprint) -> Result<Self, PlanError> {
    let decls = apply_defaults(&blueprint.modules)?;
    let mut graph = DiGraph::new();
    let mut index = HashMap::new();

    for decl in &decls {
      for property in decl.ignored_properties() {
        warn!(module = %decl.name, module_type = %decl.module_type, property, "property ignored by module type");
      }

      for target in decl.module_type.targets(decl.host_supported) {
        let id = VariantId::new(&decl.name, target);
        if index.contains_key(&id) {
          return Err(PlanError::DuplicateModule { name: decl.name.clone() });
        }
        let module = Module::from_decl(decl, target);
        let deps = module
          .deps()
          .into_iter()
          .map(|edge| DeclaredDep { edge, node: None })
          .collect();
        let idx = graph.add_node(Node::Module { module, deps });
        index.insert(id, idx);
      }
    }

    let mut dag = Self {
      platform: blueprint.platform.clone(),
      graph,
      index,
    };
    dag.resolve_edges();
    dag.verify_acyclic()?;

    info!(variants = dag.index.len(), "built module graph");
    Ok(dag)
  }

  /// Register a peer for a name no blueprint module defines.
  pub fn add_external(&mut self, name: &str, target: Target, peer: ExternalPeer) -> Result<(), PlanError> {
    let id = VariantId::new(name, target);
    if self.index.contains_key(&id) {
      return Err(PlanError::DuplicateModule { name: name.to_string() });
    }
    let idx = self.graph.add_node(Node::External { id: id.clone(), peer });
    self.index.insert(id, idx);
    self.resolve_edges();
    debug!(module = %name, target = %target, "registered external peer");
    Ok(())
  }

  /// Attach every unresolved edge whose target now exists.
  fn resolve_edges(&mut self) {
    let mut added = Vec::new();
    for dependent in self.graph.node_indices() {
      let Node::Module { module, deps } = &mut self.graph[dependent] else {
        continue;
      };
      let target = module.target();
      for dep in deps.iter_mut().filter(|d| d.node.is_none()) {
        if let Some(&idx) = self.index.get(&VariantId::new(&dep.edge.to, target)) {
          dep.node = Some(idx);
          added.push((idx, dependent, dep.edge.kind));
        }
      }
    }
    for (dependency, dependent, kind) in added {
      self.graph.add_edge(dependency, dependent, kind);
    }
  }

  fn verify_acyclic(&self) -> Result<(), PlanError> {
    toposort(&self.graph, None)
      .map(|_| ())
      .map_err(|cycle| PlanError::CycleDetected(self.graph[cycle.node_id()].id().to_string()))
  }

  /// Every blueprint variant, sorted.
  pub fn variants(&self) -> Vec<VariantId> {
    let mut ids: Vec<VariantId> = self
      .graph
      .node_weights()
      .filter(|n| matches!(n, Node::Module { .. }))
      .map(Node::id)
      .collect();
    ids.sort();
    ids
  }

  pub fn module(&self, name: &str, target: Target) -> Option<&Module> {
    let idx = self.index.get(&VariantId::new(name, target))?;
    match &self.graph[*idx] {
      Node::Module { module, .. } => Some(module),
      Node::External { .. } => None,
    }
  }

  /// Edges declared by one blueprint variant, in declaration order.
  pub fn declared_deps(&self, name: &str, target: Target) -> Option<Vec<DepEdge>> {
    let idx = self.index.get(&VariantId::new(name, target))?;
    match &self.graph[*idx] {
      Node::Module { deps, .. } => Some(deps.iter().map(|d| d.edge.clone()).collect()),
      Node::External { .. } => None,
    }
  }

  fn wave_indices(&self) -> Result<Vec<Vec<NodeIndex>>, PlanError> {
    let mut in_degree: HashMap<NodeIndex, usize> = self
      .graph
      .node_indices()
      .map(|idx| (idx, self.graph.neighbors_directed(idx, Direction::Incoming).count()))
      .collect();
    let mut remaining: HashSet<NodeIndex> = self.graph.node_indices().collect();
    let mut waves = Vec::new();

    while !remaining.is_empty() {
      let mut ready: Vec<NodeIndex> = remaining.iter().filter(|&&idx| in_degree[&idx] == 0).copied().collect();
      if ready.is_empty() {
        let stuck = remaining.iter().next().map(|idx| self.graph[*idx].id().to_string());
        return Err(PlanError::CycleDetected(stuck.unwrap_or_default()));
      }
      ready.sort_by_key(|idx| self.graph[*idx].id());

      for idx in &ready {
        remaining.remove(idx);
        for neighbor in self.graph.neighbors_directed(*idx, Direction::Outgoing) {
          if let Some(deg) = in_degree.get_mut(&neighbor) {
            *deg = deg.saturating_sub(1);
          }
        }
      }

      ready.retain(|idx| matches!(self.graph[*idx], Node::Module { .. }));
      if !ready.is_empty() {
        waves.push(ready);
      }
    }

    Ok(waves)
  }

  /// Blueprint variants grouped so that every dependency is in an earlier wave.
  pub fn waves(&self) -> Result<Vec<Vec<VariantId>>, PlanError> {
    Ok(
      self
        .wave_indices()?
        .into_iter()
        .map(|wave| wave.into_iter().map(|idx| self.graph[idx].id()).collect())
        .collect(),
    )
  }

  /// Plan every variant.
  ///
  /// Module errors fail only their variant; dependents of a failed or skipped
  /// variant are skipped. An internal fault aborts the run.
  pub fn plan(&self, sources: &dyn SourceTree, env: &EnvOverrides) -> Result<Plan, PlanError> {
    let cx = ModuleContext {
      platform: &self.platform,
      env,
      sources,
    };
    let mut planned: HashMap<NodeIndex, ModulePlan> = HashMap::new();
    let mut blocked: HashSet<NodeIndex> = HashSet::new();
    let mut plan = Plan::default();

    for (n, wave) in self.wave_indices()?.into_iter().enumerate() {
      info!(wave = n, modules = wave.len(), "planning wave");

      let outcomes = wave
        .par_iter()
        .map(|&idx| self.plan_variant(idx, &cx, &planned, &blocked).map(|o| (idx, o)))
        .collect::<Result<Vec<_>, PlanError>>()?;

      for (idx, outcome) in outcomes {
        let id = self.graph[idx].id();
        match outcome {
          Outcome::Planned(module_plan) => {
            debug!(module = %id.name, target = %id.target, "planned module");
            planned.insert(idx, module_plan);
          }
          Outcome::Failed(err) => {
            warn!(module = %id.name, target = %id.target, error = %err, "module failed");
            blocked.insert(idx);
            plan.failed.push(ModuleFailure {
              name: id.name,
              target: id.target,
              message: err.to_string(),
            });
          }
          Outcome::Skipped(dep) => {
            info!(module = %id.name, target = %id.target, dep = %dep, "skipping module");
            blocked.insert(idx);
            plan.skipped.push(ModuleFailure {
              name: id.name,
              target: id.target,
              message: format!("dependency {:?} was not planned", dep),
            });
          }
        }
      }
    }

    plan.modules = planned.into_values().collect();
    plan.normalize();
    info!(
      planned = plan.modules.len(),
      failed = plan.failed.len(),
      skipped = plan.skipped.len(),
      "planning complete"
    );
    Ok(plan)
  }

  fn plan_variant(
    &self,
    idx: NodeIndex,
    cx: &ModuleContext<'_>,
    planned: &HashMap<NodeIndex, ModulePlan>,
    blocked: &HashSet<NodeIndex>,
  ) -> Result<Outcome, PlanError> {
    let Node::Module { module, deps } = &self.graph[idx] else {
      return Ok(Outcome::Skipped(String::new()));
    };

    let mut resolved = Vec::with_capacity(deps.len());
    for dep in deps {
      let Some(node) = dep.node else {
        return Ok(Outcome::Failed(ModuleError::MissingDependency {
          module: module.name().to_string(),
          dep: dep.edge.to.clone(),
        }));
      };
      if blocked.contains(&node) {
        return Ok(Outcome::Skipped(dep.edge.to.clone()));
      }

      let peer: &dyn Peer = match &self.graph[node] {
        Node::External { peer, .. } => peer,
        Node::Module { .. } => planned.get(&node).ok_or_else(|| InternalFault::UnplannedDependency {
          module: module.name().to_string(),
          dep: dep.edge.to.clone(),
        })?,
      };
      if dep.edge.kind == DepKind::Source && peer.as_source_generator().is_none() {
        return Ok(Outcome::Failed(ModuleError::NotSourceGenerator {
          module: module.name().to_string(),
          dep: dep.edge.to.clone(),
        }));
      }

      resolved.push(ResolvedDep {
        name: &dep.edge.to,
        kind: dep.edge.kind,
        peer,
      });
    }

    let inputs = match collect_deps(module.name(), &resolved) {
      Ok(inputs) => inputs,
      Err(PlanError::Module(err)) => return Ok(Outcome::Failed(err)),
      Err(err) => return Err(err),
    };

    Ok(match module.generate(cx, &inputs) {
      Ok(plan) => Outcome::Planned(plan),
      Err(err) => Outcome::Failed(err),
    })
  }
}

//! Defaults inheritance.
//!
//! `java_defaults` modules hold no build action; they are property templates.
//! A module that lists defaults gets the templates layered underneath its own
//! properties before any dependency is declared.

use std::collections::HashMap;

use tracing::debug;

use super::types::{CompilerProperties, DeviceProperties, ModuleDecl, ModuleType};
use crate::error::PlanError;

type Layer = (CompilerProperties, DeviceProperties);

struct DefaultsResolver<'a> {
  templates: HashMap<&'a str, &'a ModuleDecl>,
  resolved: HashMap<String, Layer>,
  visiting: Vec<String>,
}

impl<'a> DefaultsResolver<'a> {
  fn new(modules: &'a [ModuleDecl]) -> Self {
    let mut templates = HashMap::new();
    for decl in modules.iter().filter(|m| m.module_type == ModuleType::JavaDefaults) {
      templates.entry(decl.name.as_str()).or_insert(decl);
    }
    Self {
      templates,
      resolved: HashMap::new(),
      visiting: Vec::new(),
    }
  }

  /// Fold the listed defaults into a single layer, in listed order.
  fn layer_for(&mut self, module: &str, defaults: &[String]) -> Result<Layer, PlanError> {
    let mut layer = Layer::default();
    for name in defaults {
      let (compiler, device) = self.resolve(module, name)?;
      layer.0.append(&compiler);
      layer.1.append(&device);
    }
    Ok(layer)
  }

  /// Effective properties of one defaults module, including its own defaults.
  fn resolve(&mut self, module: &str, name: &str) -> Result<Layer, PlanError> {
    if let Some(layer) = self.resolved.get(name) {
      return Ok(layer.clone());
    }
    if self.visiting.iter().any(|v| v == name) {
      return Err(PlanError::DefaultsCycle(name.to_string()));
    }
    let decl = *self.templates.get(name).ok_or_else(|| PlanError::UnknownDefaults {
      module: module.to_string(),
      defaults: name.to_string(),
    })?;

    self.visiting.push(name.to_string());
    let inherited = self.layer_for(name, &decl.defaults);
    self.visiting.pop();
    let (inherited_compiler, inherited_device) = inherited?;

    let mut compiler = decl.compiler.clone();
    compiler.prepend(&inherited_compiler);
    let mut device = decl.device.clone();
    device.prepend(&inherited_device);

    let layer = (compiler, device);
    self.resolved.insert(name.to_string(), layer.clone());
    Ok(layer)
  }
}

/// Return the declarations with every `defaults` list applied.
pub fn apply_defaults(modules: &[ModuleDecl]) -> Result<Vec<ModuleDecl>, PlanError> {
  let mut resolver = DefaultsResolver::new(modules);
  let mut out = Vec::with_capacity(modules.len());

  for decl in modules {
    let mut decl = decl.clone();
    if !decl.defaults.is_empty() {
      let (compiler, device) = resolver.layer_for(&decl.name, &decl.defaults)?;
      decl.compiler.prepend(&compiler);
      decl.device.prepend(&device);
      debug!(module = %decl.name, defaults = ?decl.defaults, "applied defaults");
    }
    out.push(decl);
  }

  Ok(out)
}

use std::path::PathBuf;

use tracing::debug;

use super::ModuleContext;
use crate::config::{CompilerProperties, DeviceProperties, ModuleDecl};
use crate::deps::{DepEdge, DepInputs, Declarator};
use crate::error::ModuleError;
use crate::pipeline::Pipeline;
use crate::plan::ModulePlan;
use crate::platform::Target;
use crate::transform::{ArtifactPath, Rule, Stage, Transform, TransformCtx};

/// The compilable base shared by libraries and binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaModule {
  pub name: String,
  pub target: Target,
  pub dir: PathBuf,
  pub defaults: Vec<String>,
  pub compiler: CompilerProperties,
  pub device: DeviceProperties,
}

impl JavaModule {
  pub fn new(decl: &ModuleDecl, target: Target) -> Self {
    let mut device = decl.device.clone();
    device.dex = decl.module_type.dex_by_default();
    Self {
      name: decl.name.clone(),
      target,
      dir: decl.dir.clone(),
      defaults: decl.defaults.clone(),
      compiler: decl.compiler.clone(),
      device,
    }
  }

  pub fn declarator(&self) -> Declarator<'_> {
    Declarator {
      name: &self.name,
      target: self.target,
      defaults: &self.defaults,
      compiler: &self.compiler,
      device: &self.device,
    }
  }

  /// Run the artifact pipeline and publish its outputs into `plan`.
  fn compile(
    &self,
    cx: &ModuleContext<'_>,
    deps: &DepInputs,
    tcx: &mut TransformCtx,
    plan: &mut ModulePlan,
  ) -> Result<(), ModuleError> {
    let pipeline = Pipeline {
      name: &self.name,
      target: self.target,
      dir: &self.dir,
      compiler: &self.compiler,
      device: &self.device,
      platform: cx.platform,
      env: cx.env,
      sources: cx.sources,
    };
    let output = pipeline.run(deps, tcx)?;

    plan.classpath_files = output.classpath_file.into_iter().collect();
    plan.output_file = output.output_file;
    plan.aidl_include_dirs = output.export_aidl_include_dirs;
    Ok(())
  }
}

/// A library: compiles, and installs its jar unless told not to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
  pub module: JavaModule,
}

impl Library {
  pub fn deps(&self) -> Vec<DepEdge> {
    self.module.declarator().declare()
  }

  pub(super) fn generate(
    &self,
    cx: &ModuleContext<'_>,
    deps: &DepInputs,
    tcx: &mut TransformCtx,
    plan: &mut ModulePlan,
  ) -> Result<(), ModuleError> {
    self.module.compile(cx, deps, tcx, plan)?;

    if !self.module.compiler.installable() {
      debug!(module = %self.module.name, "not installable");
      return Ok(());
    }
    if let Some(output) = &plan.output_file {
      let dest = cx
        .platform
        .install_dir(self.module.target)
        .join("framework")
        .join(format!("{}.jar", self.module.name));
      let installed =
        tcx.record(Transform::new(Rule::Install, ArtifactPath::new(dest)).with_inputs(vec![output.clone()]))?;
      plan.install_file = Some(installed);
    }
    Ok(())
  }
}

/// A library plus a wrapper script installed into `bin/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
  pub library: Library,
  pub wrapper: Option<String>,
}

impl Binary {
  pub fn deps(&self) -> Vec<DepEdge> {
    self.library.deps()
  }

  pub(super) fn generate(
    &self,
    cx: &ModuleContext<'_>,
    deps: &DepInputs,
    tcx: &mut TransformCtx,
    plan: &mut ModulePlan,
  ) -> Result<(), ModuleError> {
    self.library.generate(cx, deps, tcx, plan)?;

    let module = &self.library.module;
    let wrapper = self.wrapper.as_ref().ok_or_else(|| ModuleError::MissingWrapper {
      module: module.name.clone(),
    })?;
    let wrapper = module.dir.join(wrapper);
    if !cx.sources.exists(&wrapper) {
      return Err(ModuleError::missing_source(&module.name, Stage::InstallWrapper, wrapper));
    }

    let dest = cx.platform.install_dir(module.target).join("bin").join(&module.name);
    // The wrapper runs the installed jar; it must not be installed before it.
    let binary = tcx.record(
      Transform::new(Rule::InstallExecutable, ArtifactPath::new(dest))
        .with_inputs(vec![ArtifactPath::new(wrapper)])
        .with_implicits(plan.install_file.iter().cloned().collect()),
    )?;
    plan.binary_file = Some(binary);
    Ok(())
  }
}

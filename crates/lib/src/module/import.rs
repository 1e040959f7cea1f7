use std::path::PathBuf;

use super::ModuleContext;
use crate::config::ModuleDecl;
use crate::error::ModuleError;
use crate::pipeline::combine_jars;
use crate::plan::ModulePlan;
use crate::platform::Target;
use crate::transform::{ArtifactPath, Stage, TransformCtx};

/// Prebuilt jars repackaged as one module. No sources, no compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
  pub name: String,
  pub target: Target,
  pub dir: PathBuf,
  pub jars: Vec<String>,
}

impl Import {
  pub fn new(decl: &ModuleDecl, target: Target) -> Self {
    Self {
      name: decl.name.clone(),
      target,
      dir: decl.dir.clone(),
      jars: decl.jars.clone(),
    }
  }

  pub(super) fn generate(
    &self,
    cx: &ModuleContext<'_>,
    tcx: &mut TransformCtx,
    plan: &mut ModulePlan,
  ) -> Result<(), ModuleError> {
    let mut jars = Vec::with_capacity(self.jars.len());
    for jar in &self.jars {
      let path = self.dir.join(jar);
      if !cx.sources.exists(&path) {
        return Err(ModuleError::missing_source(&self.name, Stage::Combine, path));
      }
      jars.push(ArtifactPath::new(path));
    }

    let combined = combine_jars(tcx, "classes.jar", jars)?;
    plan.classpath_files = combined.iter().cloned().collect();
    plan.output_file = combined;
    Ok(())
  }
}

/// An sdk prebuilt: an import that may also export a preprocessed aidl file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkPrebuilt {
  pub import: Import,
  pub aidl_preprocessed: Option<String>,
}

impl SdkPrebuilt {
  pub(super) fn generate(
    &self,
    cx: &ModuleContext<'_>,
    tcx: &mut TransformCtx,
    plan: &mut ModulePlan,
  ) -> Result<(), ModuleError> {
    self.import.generate(cx, tcx, plan)?;

    if let Some(aidl) = &self.aidl_preprocessed {
      let path = self.import.dir.join(aidl);
      if !cx.sources.exists(&path) {
        return Err(ModuleError::missing_source(&self.import.name, Stage::Combine, path));
      }
      plan.aidl_preprocessed = Some(ArtifactPath::new(path));
    }
    Ok(())
  }
}

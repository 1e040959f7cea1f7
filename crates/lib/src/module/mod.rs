//! Module variants.
//!
//! Variants are built by composition: a [`Binary`] holds a [`Library`], which
//! holds the compilable [`JavaModule`]; an [`SdkPrebuilt`] holds an [`Import`].
//! [`Module`] dispatches over the closed set.

mod import;
mod java;

pub use import::{Import, SdkPrebuilt};
pub use java::{Binary, JavaModule, Library};

use std::path::Path;

use tracing::debug;

use crate::config::{ModuleDecl, VariantKind};
use crate::deps::{DepEdge, DepInputs};
use crate::env::EnvOverrides;
use crate::error::ModuleError;
use crate::plan::ModulePlan;
use crate::platform::{PlatformConfig, Target};
use crate::sources::SourceTree;
use crate::transform::TransformCtx;

/// Run-wide state every module variant plans against. Read-only.
#[derive(Clone, Copy)]
pub struct ModuleContext<'a> {
  pub platform: &'a PlatformConfig,
  pub env: &'a EnvOverrides,
  pub sources: &'a dyn SourceTree,
}

/// A property template. Declares nothing and plans to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsModule {
  pub name: String,
  pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Module {
  Library(Library),
  Binary(Binary),
  Import(Import),
  SdkPrebuilt(SdkPrebuilt),
  Defaults(DefaultsModule),
}

impl Module {
  /// Build the `target` variant of a declaration. Defaults must already be applied.
  pub fn from_decl(decl: &ModuleDecl, target: Target) -> Self {
    match decl.module_type.variant_kind() {
      VariantKind::Library => Module::Library(Library {
        module: JavaModule::new(decl, target),
      }),
      VariantKind::Binary => Module::Binary(Binary {
        library: Library {
          module: JavaModule::new(decl, target),
        },
        wrapper: decl.wrapper.clone(),
      }),
      VariantKind::Import => Module::Import(Import::new(decl, target)),
      VariantKind::SdkPrebuilt => Module::SdkPrebuilt(SdkPrebuilt {
        import: Import::new(decl, target),
        aidl_preprocessed: decl.aidl_preprocessed.clone(),
      }),
      VariantKind::Defaults => Module::Defaults(DefaultsModule {
        name: decl.name.clone(),
        target,
      }),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Module::Library(m) => &m.module.name,
      Module::Binary(m) => &m.library.module.name,
      Module::Import(m) => &m.name,
      Module::SdkPrebuilt(m) => &m.import.name,
      Module::Defaults(m) => &m.name,
    }
  }

  pub fn target(&self) -> Target {
    match self {
      Module::Library(m) => m.module.target,
      Module::Binary(m) => m.library.module.target,
      Module::Import(m) => m.target,
      Module::SdkPrebuilt(m) => m.import.target,
      Module::Defaults(m) => m.target,
    }
  }

  pub fn kind(&self) -> VariantKind {
    match self {
      Module::Library(_) => VariantKind::Library,
      Module::Binary(_) => VariantKind::Binary,
      Module::Import(_) => VariantKind::Import,
      Module::SdkPrebuilt(_) => VariantKind::SdkPrebuilt,
      Module::Defaults(_) => VariantKind::Defaults,
    }
  }

  fn dir(&self) -> &Path {
    match self {
      Module::Library(m) => &m.module.dir,
      Module::Binary(m) => &m.library.module.dir,
      Module::Import(m) => &m.dir,
      Module::SdkPrebuilt(m) => &m.import.dir,
      Module::Defaults(_) => Path::new(""),
    }
  }

  /// Dependency edges of this variant. Only compilable modules declare any.
  pub fn deps(&self) -> Vec<DepEdge> {
    match self {
      Module::Library(m) => m.deps(),
      Module::Binary(m) => m.deps(),
      Module::Import(_) | Module::SdkPrebuilt(_) | Module::Defaults(_) => Vec::new(),
    }
  }

  /// Plan this variant from its aggregated dependency inputs.
  pub fn generate(&self, cx: &ModuleContext<'_>, deps: &DepInputs) -> Result<ModulePlan, ModuleError> {
    let mut plan = ModulePlan::new(self.name(), self.target(), self.kind());
    if let Module::Defaults(_) = self {
      return Ok(plan);
    }

    let out_dir = cx.platform.module_out_dir(self.dir(), self.name(), self.target());
    let mut tcx = TransformCtx::new(self.name(), out_dir);

    match self {
      Module::Library(m) => m.generate(cx, deps, &mut tcx, &mut plan)?,
      Module::Binary(m) => m.generate(cx, deps, &mut tcx, &mut plan)?,
      Module::Import(m) => m.generate(cx, &mut tcx, &mut plan)?,
      Module::SdkPrebuilt(m) => m.generate(cx, &mut tcx, &mut plan)?,
      Module::Defaults(_) => {}
    }

    let (transforms, leftover) = tcx.finish();
    plan.transforms = transforms;
    plan.checkbuild.extend(leftover);
    plan.checkbuild.extend(plan.output_file.clone());

    debug!(
      module = %plan.name,
      target = %plan.target,
      transforms = plan.transforms.len(),
      "generated module plan"
    );
    Ok(plan)
  }
}

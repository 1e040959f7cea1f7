//! The per-module artifact pipeline.
//!
//! Stages run in a fixed order and each one is present only when its inputs
//! are: sources, compile (plus the optional error-prone branch), resources,
//! combine, jarjar, dex. Every stage records its transform through a
//! [`TransformCtx`] and feeds its output path to the next. The first failing
//! stage ends the module; nothing after it is recorded.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{CompilerProperties, DeviceProperties};
use crate::consts::LOCAL_SRC_DIR;
use crate::deps::DepInputs;
use crate::env::EnvOverrides;
use crate::error::ModuleError;
use crate::flags::{AidlIncludes, JavacArgs, bootclasspath_flag, classpath_flag, dex_flags};
use crate::platform::{PlatformConfig, Target};
use crate::sources::{SourceError, SourceTree};
use crate::transform::{ArtifactPath, Rule, Stage, Transform, TransformCtx};

/// Everything a compile needs besides its resolved dependencies.
#[derive(Clone, Copy)]
pub struct Pipeline<'a> {
  pub name: &'a str,
  pub target: Target,
  /// Module directory relative to the source root.
  pub dir: &'a Path,
  pub compiler: &'a CompilerProperties,
  pub device: &'a DeviceProperties,
  pub platform: &'a PlatformConfig,
  pub env: &'a EnvOverrides,
  pub sources: &'a dyn SourceTree,
}

/// What a finished pipeline exposes to the module variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
  /// The jar dependents compile against: combined or jarjar'd, never dexed.
  pub classpath_file: Option<ArtifactPath>,
  /// The final artifact: the dex jar if dex ran, else the classpath jar.
  pub output_file: Option<ArtifactPath>,
  /// Aidl include dirs this module exports.
  pub export_aidl_include_dirs: Vec<PathBuf>,
}

impl Pipeline<'_> {
  /// Run every present stage, recording transforms into `tcx`.
  pub fn run(&self, deps: &DepInputs, tcx: &mut TransformCtx) -> Result<PipelineOutput, ModuleError> {
    let export_dirs: Vec<PathBuf> = self
      .device
      .export_aidl_include_dirs
      .iter()
      .map(|d| self.dir.join(d))
      .collect();

    let srcs = self.expand_sources(deps)?;
    let args = self.javac_args(deps, &export_dirs);

    let mut jars = Vec::new();
    let compiled = !srcs.is_empty();
    if compiled {
      jars.push(self.compile(&srcs, deps, &args, tcx)?);
    } else {
      debug!(module = %self.name, "no sources, skipping compile");
    }

    if let Some(res) = self.resources(tcx)? {
      jars.push(res);
    }

    jars.extend(deps.static_jars.iter().cloned());

    let mut classpath_file = combine_jars(tcx, "classes-combined.jar", jars)?;

    if let Some(rules) = &self.compiler.jarjar_rules {
      classpath_file = Some(self.jarjar(rules, classpath_file, tcx)?);
    }

    let output_file = match &classpath_file {
      Some(jar) if self.device.dex && compiled => Some(self.dex(jar, tcx)?),
      _ => classpath_file.clone(),
    };

    Ok(PipelineOutput {
      classpath_file,
      output_file,
      export_aidl_include_dirs: export_dirs,
    })
  }

  fn missing(&self, stage: Stage, path: impl Into<PathBuf>) -> ModuleError {
    ModuleError::missing_source(self.name, stage, path)
  }

  /// Configured sources minus excludes, then generated sources.
  fn expand_sources(&self, deps: &DepInputs) -> Result<Vec<ArtifactPath>, ModuleError> {
    let patterns: Vec<String> = self
      .compiler
      .srcs
      .iter()
      .filter(|s| !s.starts_with(':'))
      .cloned()
      .collect();

    let files = self
      .sources
      .expand(self.dir, &patterns, &self.compiler.exclude_srcs)
      .map_err(|e| match e {
        SourceError::Missing(path) => self.missing(Stage::Sources, path),
        other => ModuleError::stage_failed(self.name, Stage::Sources, other),
      })?;

    let mut srcs: Vec<ArtifactPath> = files.into_iter().map(ArtifactPath::from).collect();
    srcs.extend(deps.generated_sources.iter().cloned());
    debug!(module = %self.name, count = srcs.len(), "expanded sources");
    Ok(srcs)
  }

  fn javac_args(&self, deps: &DepInputs, export_dirs: &[PathBuf]) -> JavacArgs {
    let local_dirs: Vec<PathBuf> = self.device.aidl_includes.iter().map(|d| self.dir.join(d)).collect();
    let local_src = self.dir.join(LOCAL_SRC_DIR);
    let local_src_exists = self.sources.exists(&local_src);

    let aidl = AidlIncludes {
      preprocessed: deps.aidl_preprocessed.as_ref(),
      dep_dirs: &deps.aidl_include_dirs,
      export_dirs,
      local_dirs: &local_dirs,
      module_dir: self.dir,
      local_src: local_src_exists.then_some(local_src.as_path()),
    };

    let mut src_file_lists = deps.src_file_lists.clone();
    src_file_lists.extend(self.compiler.extra_src_lists.iter().map(|l| ArtifactPath::new(self.dir.join(l))));

    JavacArgs {
      javac_flags: self.compiler.javacflags.clone(),
      java_version: self
        .compiler
        .java_version
        .clone()
        .unwrap_or_else(|| self.platform.default_java_version.clone()),
      bootclasspath: bootclasspath_flag(&deps.bootclasspath, self.target),
      classpath: classpath_flag(&deps.classpath),
      aidl_flags: aidl.flags(),
      src_file_lists,
    }
  }

  /// Javac, plus the error-prone branch when enabled. The branch output is not
  /// consumed; the next transform recorded waits for it.
  fn compile(
    &self,
    srcs: &[ArtifactPath],
    deps: &DepInputs,
    args: &JavacArgs,
    tcx: &mut TransformCtx,
  ) -> Result<ArtifactPath, ModuleError> {
    let mut implicits = deps.bootclasspath.clone();
    implicits.extend(deps.classpath.iter().cloned());
    implicits.extend(args.src_file_lists.iter().cloned());

    let classes = tcx.record(
      Transform::new(Rule::Javac(args.clone()), tcx.out("classes-compiled.jar"))
        .with_inputs(srcs.to_vec())
        .with_implicits(implicits.clone()),
    )?;

    if self.env.run_error_prone {
      let errorprone = tcx.record(
        Transform::new(Rule::ErrorProne(args.clone()), tcx.out("classes-errorprone.jar"))
          .with_inputs(srcs.to_vec())
          .with_implicits(implicits),
      )?;
      tcx.defer_order_only(errorprone);
    }

    Ok(classes)
  }

  fn resources(&self, tcx: &mut TransformCtx) -> Result<Option<ArtifactPath>, ModuleError> {
    let mut resource_dirs = Vec::new();
    for dir in &self.compiler.resource_dirs {
      if self.compiler.exclude_resource_dirs.contains(dir) {
        continue;
      }
      let path = self.dir.join(dir);
      if !self.sources.exists(&path) {
        return Err(self.missing(Stage::Resources, path));
      }
      resource_dirs.push(path);
    }

    let manifest = match &self.compiler.manifest {
      Some(m) => {
        let path = self.dir.join(m);
        if !self.sources.exists(&path) {
          return Err(self.missing(Stage::Resources, path));
        }
        Some(path)
      }
      None => None,
    };

    if resource_dirs.is_empty() && manifest.is_none() {
      return Ok(None);
    }

    let inputs: Vec<ArtifactPath> = manifest.iter().cloned().map(ArtifactPath::from).collect();
    let res = tcx.record(
      Transform::new(Rule::ResourceJar { resource_dirs, manifest }, tcx.out("res.jar")).with_inputs(inputs),
    )?;
    Ok(Some(res))
  }

  fn jarjar(
    &self,
    rules: &str,
    combined: Option<ArtifactPath>,
    tcx: &mut TransformCtx,
  ) -> Result<ArtifactPath, ModuleError> {
    let rules = self.dir.join(rules);
    if !self.sources.exists(&rules) {
      return Err(self.missing(Stage::JarJar, rules));
    }
    let combined =
      combined.ok_or_else(|| ModuleError::stage_failed(self.name, Stage::JarJar, "no jar to rewrite"))?;

    tcx.record(
      Transform::new(Rule::JarJar { rules: rules.clone() }, tcx.out("classes-jarjar.jar"))
        .with_inputs(vec![combined])
        .with_implicits(vec![ArtifactPath::new(rules)]),
    )
  }

  fn dex(&self, jar: &ArtifactPath, tcx: &mut TransformCtx) -> Result<ArtifactPath, ModuleError> {
    let flags = dex_flags(
      &self.device.dxflags,
      self.device.sdk_version(),
      self.env,
      self.platform,
      tcx.out_dir(),
    );

    let dex = tcx.record(Transform::new(Rule::Dex { flags }, tcx.out("dex/classes.dex")).with_inputs(vec![jar.clone()]))?;

    let resource_dirs = self
      .compiler
      .resource_dirs
      .iter()
      .filter(|d| !self.compiler.exclude_resource_dirs.contains(d))
      .map(|d| self.dir.join(d))
      .collect();

    tcx.record(Transform::new(Rule::DexToJavaLib { resource_dirs }, tcx.out("javalib.jar")).with_inputs(vec![dex]))
  }
}

/// Merge `jars` into `name` under the module's out dir.
///
/// No jars means no output. A single jar is used as is, without a transform.
pub fn combine_jars(
  tcx: &mut TransformCtx,
  name: &str,
  jars: Vec<ArtifactPath>,
) -> Result<Option<ArtifactPath>, ModuleError> {
  match jars.len() {
    0 => Ok(None),
    1 => {
      let jar = jars.into_iter().next();
      debug!(module = %tcx.module(), jar = ?jar, "single jar, skipping combine");
      Ok(jar)
    }
    _ => {
      let output = tcx.out(name);
      tcx.record(Transform::new(Rule::CombineJars, output).with_inputs(jars)).map(Some)
    }
  }
}

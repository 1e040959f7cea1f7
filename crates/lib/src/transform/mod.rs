//! Artifact transforms and their recording context.
//!
//! The planner never runs a tool. Each pipeline stage records a [`Transform`]
//! describing the tool, its inputs and its single output artifact, and gets
//! the output path back to feed the next stage. The executor downstream runs
//! each distinct output at most once and orders transforms by the artifacts
//! they share.

mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ModuleError;

/// Records the transforms of one module variant, in pipeline order.
///
/// Besides plain recording it carries pending order-only artifacts: outputs
/// that some later transform must wait for without consuming them. They are
/// attached to the next transform recorded.
#[derive(Debug)]
pub struct TransformCtx {
  module: String,
  out_dir: PathBuf,
  transforms: Vec<Transform>,
  pending_order_only: Vec<ArtifactPath>,
}

impl TransformCtx {
  pub fn new(module: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
    Self {
      module: module.into(),
      out_dir: out_dir.into(),
      transforms: Vec::new(),
      pending_order_only: Vec::new(),
    }
  }

  pub fn module(&self) -> &str {
    &self.module
  }

  /// The module's intermediates directory.
  pub fn out_dir(&self) -> &Path {
    &self.out_dir
  }

  /// Path of an intermediate file of this module.
  pub fn out(&self, name: &str) -> ArtifactPath {
    ArtifactPath::new(self.out_dir.join(name))
  }

  /// Make the next recorded transform wait for `artifact`.
  pub fn defer_order_only(&mut self, artifact: ArtifactPath) {
    self.pending_order_only.push(artifact);
  }

  /// Record a transform and return its output artifact.
  ///
  /// Fails the stage if the transform has no inputs where it needs some,
  /// depends on its own output, or writes an artifact another transform of
  /// this module already writes.
  pub fn record(&mut self, mut transform: Transform) -> Result<ArtifactPath, ModuleError> {
    let stage = transform.stage();
    if !self.pending_order_only.is_empty() {
      let mut pending = std::mem::take(&mut self.pending_order_only);
      pending.append(&mut transform.order_only);
      transform.order_only = pending;
    }

    transform
      .validate()
      .map_err(|message| ModuleError::stage_failed(&self.module, stage, message))?;

    if self.transforms.iter().any(|t| t.output == transform.output) {
      return Err(ModuleError::stage_failed(
        &self.module,
        stage,
        format!("output {} is already produced", transform.output),
      ));
    }

    debug!(module = %self.module, stage = %stage, output = %transform.output, "recorded transform");
    let output = transform.output.clone();
    self.transforms.push(transform);
    Ok(output)
  }

  /// Returns the number of transforms recorded so far.
  pub fn transform_count(&self) -> usize {
    self.transforms.len()
  }

  /// Consume the context, returning the transforms and any order-only
  /// artifacts no later transform picked up.
  pub fn finish(self) -> (Vec<Transform>, Vec<ArtifactPath>) {
    (self.transforms, self.pending_order_only)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn combine(inputs: &[&str], output: &str) -> Transform {
    Transform::new(Rule::CombineJars, ArtifactPath::from(output))
      .with_inputs(inputs.iter().map(|s| ArtifactPath::from(*s)).collect())
  }

  #[test]
  fn out_paths_live_under_module_dir() {
    let ctx = TransformCtx::new("lib", "out/lib/android_common");
    assert_eq!(ctx.out("classes.jar"), ArtifactPath::from("out/lib/android_common/classes.jar"));
  }

  #[test]
  fn pending_order_only_attaches_to_next_transform_once() {
    let mut ctx = TransformCtx::new("lib", "out");
    ctx.defer_order_only(ArtifactPath::from("out/errorprone.jar"));

    ctx.record(combine(&["a.jar", "b.jar"], "out/c.jar")).unwrap();
    ctx.record(combine(&["out/c.jar", "d.jar"], "out/e.jar")).unwrap();

    let (transforms, leftover) = ctx.finish();
    assert_eq!(transforms[0].order_only, vec![ArtifactPath::from("out/errorprone.jar")]);
    assert!(transforms[1].order_only.is_empty());
    assert!(leftover.is_empty());
  }

  #[test]
  fn unclaimed_order_only_is_returned() {
    let mut ctx = TransformCtx::new("lib", "out");
    ctx.defer_order_only(ArtifactPath::from("out/errorprone.jar"));
    let (transforms, leftover) = ctx.finish();
    assert!(transforms.is_empty());
    assert_eq!(leftover, vec![ArtifactPath::from("out/errorprone.jar")]);
  }

  #[test]
  fn duplicate_output_fails_the_stage() {
    let mut ctx = TransformCtx::new("lib", "out");
    ctx.record(combine(&["a.jar", "b.jar"], "out/c.jar")).unwrap();
    let err = ctx.record(combine(&["x.jar", "y.jar"], "out/c.jar")).unwrap_err();
    assert!(matches!(err, ModuleError::StageFailed { stage: Stage::Combine, .. }));
    assert_eq!(ctx.transform_count(), 1);
  }
}

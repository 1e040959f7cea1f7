//! Dependency declaration.
//!
//! Turns a module's configuration into typed edges. Declaration never looks at
//! the graph; the graph resolves the names afterwards.

use tracing::debug;

use super::edge::{DepEdge, DepKind};
use crate::config::{CompilerProperties, DeviceProperties};
use crate::consts::{
  DEFAULT_BOOTCLASSPATH_LIBRARIES, DEFAULT_LIBRARIES, FRAMEWORK_MODULE, FRAMEWORK_RES_MODULE, SDK_MODULE_PREFIX,
  STUBS_CURRENT, STUBS_SYSTEM_CURRENT, STUBS_TEST_CURRENT,
};
use crate::platform::Target;

/// The slice of a module's configuration that determines its edges.
#[derive(Debug, Clone, Copy)]
pub struct Declarator<'a> {
  pub name: &'a str,
  pub target: Target,
  pub defaults: &'a [String],
  pub compiler: &'a CompilerProperties,
  pub device: &'a DeviceProperties,
}

impl Declarator<'_> {
  /// Declare every edge of the module, in resolution order.
  ///
  /// Pure: calling it twice on the same configuration yields the same edges.
  pub fn declare(&self) -> Vec<DepEdge> {
    let mut edges = Vec::new();

    for name in self.defaults {
      self.edge(&mut edges, name, DepKind::Defaults);
    }

    if !self.compiler.no_standard_libs() {
      self.declare_standard_libs(&mut edges);
    }

    for name in &self.compiler.libs {
      self.edge(&mut edges, name, DepKind::Lib);
    }
    for name in &self.compiler.static_libs {
      self.edge(&mut edges, name, DepKind::StaticLib);
    }

    if self.name == FRAMEWORK_MODULE {
      self.edge(&mut edges, FRAMEWORK_RES_MODULE, DepKind::FrameworkRes);
    }

    for src in &self.compiler.srcs {
      if let Some(module) = src.strip_prefix(':') {
        self.edge(&mut edges, module, DepKind::Source);
      }
    }

    debug!(module = %self.name, target = %self.target, edges = edges.len(), "declared dependencies");
    edges
  }

  fn declare_standard_libs(&self, edges: &mut Vec<DepEdge>) {
    match self.target {
      Target::Device => match self.device.sdk_version() {
        "" => {
          for name in DEFAULT_BOOTCLASSPATH_LIBRARIES {
            self.edge(edges, name, DepKind::BootClasspath);
          }
          for name in DEFAULT_LIBRARIES {
            self.edge(edges, name, DepKind::Lib);
          }
        }
        "current" => self.edge(edges, STUBS_CURRENT, DepKind::BootClasspath),
        "test_current" => self.edge(edges, STUBS_TEST_CURRENT, DepKind::BootClasspath),
        "system_current" => self.edge(edges, STUBS_SYSTEM_CURRENT, DepKind::BootClasspath),
        version => self.edge(edges, &format!("{}{}", SDK_MODULE_PREFIX, version), DepKind::Sdk),
      },
      Target::Host => {
        if self.device.dex {
          for name in DEFAULT_BOOTCLASSPATH_LIBRARIES {
            self.edge(edges, name, DepKind::BootClasspath);
          }
        }
      }
    }
  }

  fn edge(&self, edges: &mut Vec<DepEdge>, to: &str, kind: DepKind) {
    edges.push(DepEdge::new(self.name, to, kind));
  }
}

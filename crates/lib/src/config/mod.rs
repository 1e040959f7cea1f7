//! Module configuration.
//!
//! A blueprint is a JSON document declaring platform settings and a list of
//! modules. Each declaration is immutable once parsed; defaults are applied
//! once, before dependency edges are declared.
//!
//! ```json
//! {
//!   "platform": { "default_app_target_sdk": 25 },
//!   "modules": [
//!     { "type": "java_library", "name": "core", "srcs": ["src/**/*.java"] }
//!   ]
//! }
//! ```

mod defaults;
mod types;

pub use defaults::apply_defaults;
pub use types::*;

use std::path::Path;

use crate::error::PlanError;

impl Blueprint {
  /// Parse a blueprint from JSON text.
  pub fn from_json(json: &str) -> Result<Self, PlanError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Read and parse a blueprint file.
  pub fn from_file(path: &Path) -> Result<Self, PlanError> {
    let content = std::fs::read_to_string(path).map_err(|source| PlanError::ReadBlueprint {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&content)
  }
}

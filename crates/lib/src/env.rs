//! Environment-style overrides consulted while building transform flags.
//!
//! These never change which stages run; they only add flags or enable the
//! side analysis compile. They are read once per run and passed down as a
//! value.

use serde::{Deserialize, Serialize};

pub const NO_OPTIMIZE_DX_VAR: &str = "NO_OPTIMIZE_DX";
pub const GENERATE_DEX_DEBUG_VAR: &str = "GENERATE_DEX_DEBUG";
pub const RUN_ERROR_PRONE_VAR: &str = "RUN_ERROR_PRONE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvOverrides {
  /// Pass `--no-optimize` to dx.
  pub no_optimize_dx: bool,
  /// Ask dx for debug info and a verbose class dump.
  pub generate_dex_debug: bool,
  /// Run the stricter-analysis compile alongside javac.
  pub run_error_prone: bool,
}

impl EnvOverrides {
  /// Read overrides from the process environment.
  pub fn from_env() -> Self {
    Self {
      no_optimize_dx: is_env_set(NO_OPTIMIZE_DX_VAR),
      generate_dex_debug: is_env_set(GENERATE_DEX_DEBUG_VAR),
      run_error_prone: is_env_true(RUN_ERROR_PRONE_VAR),
    }
  }
}

fn is_env_set(name: &str) -> bool {
  std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false)
}

fn is_env_true(name: &str) -> bool {
  match std::env::var(name) {
    Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "y" | "yes" | "on" | "true"),
    Err(_) => false,
  }
}

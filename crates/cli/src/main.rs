mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// jplan - plan java module builds from a blueprint
#[derive(Parser)]
#[command(name = "jplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Plan every module in a blueprint
  Plan {
    /// Path to the blueprint file
    blueprint: PathBuf,

    /// Source root (default: the blueprint's directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// JSON file of peers provided outside the blueprint
    #[arg(long)]
    externals: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Show the dependency edges one module declares
  Deps {
    /// Path to the blueprint file
    blueprint: PathBuf,

    /// Module name
    module: String,

    /// Show the host variant instead of the device variant
    #[arg(long)]
    host: bool,
  },

  /// Show the order modules are planned in
  Waves {
    /// Path to the blueprint file
    blueprint: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Plan {
      blueprint,
      root,
      externals,
      format,
    } => cmd::cmd_plan(&blueprint, root.as_deref(), externals.as_deref(), format),
    Commands::Deps {
      blueprint,
      module,
      host,
    } => cmd::cmd_deps(&blueprint, &module, host),
    Commands::Waves { blueprint } => cmd::cmd_waves(&blueprint),
  }
}

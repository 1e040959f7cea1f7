//! Implementation of the `jplan waves` command.

use std::path::Path;

use anyhow::Result;

use crate::output::{print_stat, symbols};

pub fn cmd_waves(blueprint: &Path) -> Result<()> {
  let graph = super::load_graph(blueprint)?;

  let waves = graph.waves()?;
  for (n, wave) in waves.iter().enumerate() {
    println!("Wave {}:", n);
    for id in wave {
      println!("  {} {}", symbols::INFO, id);
    }
  }

  println!();
  print_stat("Variants", &graph.variants().len().to_string());
  print_stat("Waves", &waves.len().to_string());
  Ok(())
}

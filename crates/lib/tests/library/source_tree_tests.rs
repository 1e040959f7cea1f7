//! Planning against a real directory tree.

use jplan_lib::env::EnvOverrides;
use jplan_lib::graph::ModuleGraph;
use jplan_lib::platform::Target;
use jplan_lib::sources::FsSourceTree;
use jplan_lib::transform::Stage;
use tempfile::TempDir;

use super::common::*;

fn write(root: &TempDir, relative: &str) {
  let path = root.path().join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, "").unwrap();
}

const BLUEPRINT: &str = r#"{ "modules": [{
  "type": "java_binary_host",
  "name": "tool",
  "dir": "tools/tool",
  "srcs": ["src/**/*.java"],
  "exclude_srcs": ["src/**/*Test.java"],
  "resource_dirs": ["res"],
  "manifest": "MANIFEST.MF",
  "wrapper": "tool.sh"
}] }"#;

#[test]
fn globbed_sources_and_resources_are_planned() {
  let root = TempDir::new().unwrap();
  for file in [
    "tools/tool/src/com/example/Main.java",
    "tools/tool/src/com/example/MainTest.java",
    "tools/tool/src/Util.java",
    "tools/tool/res/strings.txt",
    "tools/tool/MANIFEST.MF",
    "tools/tool/tool.sh",
  ] {
    write(&root, file);
  }

  let graph = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
  let plan = plan_with(&graph, &FsSourceTree::new(root.path()), EnvOverrides::default());
  let tool = module(&plan, "tool", Target::Host);

  assert_eq!(
    stages(tool),
    vec![
      Stage::Compile,
      Stage::Resources,
      Stage::Combine,
      Stage::Install,
      Stage::InstallWrapper,
    ]
  );
  assert_eq!(
    tool.transforms[0].inputs,
    vec![jar("tools/tool/src/Util.java"), jar("tools/tool/src/com/example/Main.java")]
  );
  assert_eq!(tool.binary_file, Some(jar("out/host/linux-x86/bin/tool")));
}

#[test]
fn missing_manifest_fails_the_module() {
  let root = TempDir::new().unwrap();
  write(&root, "tools/tool/src/Main.java");
  write(&root, "tools/tool/res/strings.txt");
  write(&root, "tools/tool/tool.sh");

  let graph = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
  let plan = plan_with(&graph, &FsSourceTree::new(root.path()), EnvOverrides::default());

  assert!(plan.modules.is_empty());
  let failure = plan.failure("tool", Target::Host).unwrap();
  assert!(failure.message.contains("MANIFEST.MF"));
}

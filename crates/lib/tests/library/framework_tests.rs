//! The `framework` / `framework-res` special case.

use jplan_lib::env::EnvOverrides;
use jplan_lib::graph::{ExternalPeer, ModuleGraph};
use jplan_lib::platform::Target;
use jplan_lib::sources::MemorySourceTree;
use jplan_lib::transform::Rule;

use super::common::*;

const BLUEPRINT: &str = r#"{ "modules": [
  {
    "type": "java_library",
    "name": "framework",
    "dir": "frameworks/base",
    "srcs": ["core/**/*.java"],
    "no_standard_libs": true
  },
  {
    "type": "java_library",
    "name": "services",
    "dir": "frameworks/services",
    "srcs": ["*.java"],
    "no_standard_libs": true,
    "libs": ["framework"]
  }
] }"#;

fn sources() -> MemorySourceTree {
  MemorySourceTree::new().with_files([
    "frameworks/base/core/java/android/app/Activity.java",
    "frameworks/services/Service.java",
  ])
}

#[test]
fn framework_compiles_framework_res_sources() {
  let mut graph = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
  graph
    .add_external(
      "framework-res",
      Target::Device,
      ExternalPeer::java(vec![jar("out/framework-res/package-res.apk")])
        .with_generated_src_list(jar("out/framework-res/R.list")),
    )
    .unwrap();
  let plan = plan_with(&graph, &sources(), EnvOverrides::default());

  let framework = module(&plan, "framework", Target::Device);
  let javac = &framework.transforms[0];
  let Rule::Javac(args) = &javac.rule else {
    panic!("expected javac");
  };
  assert_eq!(args.src_file_lists, vec![jar("out/framework-res/R.list")]);
  assert!(javac.implicits.contains(&jar("out/framework-res/R.list")));
  assert_eq!(args.classpath, None);

  let services = module(&plan, "services", Target::Device);
  let Rule::Javac(args) = &services.transforms[0].rule else {
    panic!("expected javac");
  };
  assert!(args.src_file_lists.is_empty());
  assert_eq!(args.classpath.as_deref().map(|c| c.contains("framework")), Some(true));
}

#[test]
fn framework_res_without_source_list_fails_framework_and_skips_dependents() {
  let mut graph = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
  graph
    .add_external(
      "framework-res",
      Target::Device,
      ExternalPeer::java(vec![jar("out/framework-res/package-res.apk")]),
    )
    .unwrap();
  let plan = plan_with(&graph, &sources(), EnvOverrides::default());

  assert!(plan.failure("framework", Target::Device).is_some());
  assert_eq!(plan.skipped.len(), 1);
  assert_eq!(plan.skipped[0].name, "services");
}

#[test]
fn framework_without_framework_res_fails() {
  let graph = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
  let plan = plan_with(&graph, &sources(), EnvOverrides::default());

  let failure = plan.failure("framework", Target::Device).unwrap();
  assert!(failure.message.contains("framework-res"));
}

//! Planner properties checked across the whole graph.

use jplan_lib::env::EnvOverrides;
use jplan_lib::graph::ModuleGraph;
use jplan_lib::platform::Target;
use jplan_lib::sources::MemorySourceTree;
use jplan_lib::transform::{Rule, Stage};

use super::common::*;

fn sources() -> MemorySourceTree {
  MemorySourceTree::new().with_files([
    "app/src/Main.java",
    "app/src/Util.java",
    "okio/Okio.java",
    "prebuilts/sdk/19/android.jar",
    "prebuilts/sdk/19/framework.aidl",
  ])
}

mod pipeline_shape {
  use super::*;

  #[test]
  fn empty_module_has_no_compile_resource_or_combine_stage() {
    let mut graph = ModuleGraph::new(&blueprint(r#"{ "modules": [{ "type": "java_library", "name": "empty" }] }"#)).unwrap();
    add_platform_runtime(&mut graph);
    let plan = plan_with(&graph, &sources(), EnvOverrides::default());

    let empty = module(&plan, "empty", Target::Device);
    assert!(empty.transforms.is_empty());
    assert!(empty.classpath_files.is_empty());
    assert_eq!(empty.output_file, None);
  }

  #[test]
  fn sources_plus_static_lib_link_without_resources() {
    let graph = ModuleGraph::new(&blueprint(
      r#"{ "modules": [
        { "type": "java_library_host", "name": "okio", "dir": "okio", "srcs": ["*.java"], "installable": false },
        { "type": "java_library_host", "name": "app", "dir": "app", "srcs": ["src/**/*.java"], "static_libs": ["okio"] }
      ] }"#,
    ))
    .unwrap();
    let plan = plan_with(&graph, &sources(), EnvOverrides::default());
    let app = module(&plan, "app", Target::Host);

    assert_eq!(stages(app), vec![Stage::Compile, Stage::Combine, Stage::Install]);
    let combine = &app.transforms[1];
    assert_eq!(
      combine.inputs,
      vec![
        jar("out/soong/.intermediates/app/app/linux_glibc_common/classes-compiled.jar"),
        jar("out/soong/.intermediates/okio/okio/linux_glibc_common/classes-compiled.jar"),
      ]
    );
    assert_eq!(app.output_file, Some(combine.output.clone()));
    assert_eq!(app.classpath_files, vec![combine.output.clone()]);
  }

  #[test]
  fn host_module_without_dex_never_dexes() {
    let graph = ModuleGraph::new(&blueprint(
      r#"{ "modules": [{ "type": "java_library_host", "name": "app", "dir": "app", "srcs": ["src/*.java"] }] }"#,
    ))
    .unwrap();
    let plan = plan_with(&graph, &sources(), EnvOverrides::default());

    let app = module(&plan, "app", Target::Host);
    assert!(stages(app).contains(&Stage::Compile));
    assert!(!stages(app).contains(&Stage::Dex));
  }

  #[test]
  fn host_variant_of_device_library_is_dexed() {
    let mut graph = ModuleGraph::new(&blueprint(
      r#"{ "modules": [
        { "type": "java_library", "name": "app", "dir": "app", "srcs": ["src/*.java"], "host_supported": true },
        { "type": "java_import_host", "name": "core-oj" },
        { "type": "java_import_host", "name": "core-libart" }
      ] }"#,
    ))
    .unwrap();
    add_platform_runtime(&mut graph);
    let plan = plan_with(&graph, &sources(), EnvOverrides::default());

    let host = module(&plan, "app", Target::Host);
    assert!(stages(host).contains(&Stage::Dex));
  }
}

mod classpath {
  use super::*;

  #[test]
  fn default_device_bootclasspath_is_the_platform_runtime() {
    let mut graph = ModuleGraph::new(&blueprint(
      r#"{ "modules": [{ "type": "java_library", "name": "app", "dir": "app", "srcs": ["src/*.java"] }] }"#,
    ))
    .unwrap();
    add_platform_runtime(&mut graph);
    let plan = plan_with(&graph, &sources(), EnvOverrides::default());

    let javac = &module(&plan, "app", Target::Device).transforms[0];
    let Rule::Javac(args) = &javac.rule else {
      panic!("expected javac, got {:?}", javac.rule);
    };
    assert_eq!(
      args.bootclasspath.as_deref(),
      Some("-bootclasspath out/core-oj/classes.jar:out/core-libart/classes.jar")
    );
    assert_eq!(
      args.classpath.as_deref(),
      Some("-classpath out/ext/classes.jar:out/framework/classes.jar:out/okhttp/classes.jar")
    );
  }

  #[test]
  fn sdk_prebuilt_preprocessed_aidl_replaces_include_dirs() {
    let graph = ModuleGraph::new(&blueprint(
      r#"{ "modules": [
        {
          "type": "android_prebuilt_sdk",
          "name": "sdk_v19",
          "dir": "prebuilts/sdk/19",
          "jars": ["android.jar"],
          "aidl_preprocessed": "framework.aidl"
        },
        {
          "type": "java_library",
          "name": "app",
          "dir": "app",
          "srcs": ["src/*.java"],
          "sdk_version": "19",
          "aidl_includes": ["aidl"]
        }
      ] }"#,
    ))
    .unwrap();
    let plan = plan_with(&graph, &sources(), EnvOverrides::default());
    let app = module(&plan, "app", Target::Device);

    let Rule::Javac(args) = &app.transforms[0].rule else {
      panic!("expected javac");
    };
    assert_eq!(args.aidl_flags, vec!["-pprebuilts/sdk/19/framework.aidl"]);
    assert_eq!(
      args.bootclasspath.as_deref(),
      Some("-bootclasspath prebuilts/sdk/19/android.jar")
    );

    let dex = app.transforms.iter().find(|t| t.stage() == Stage::Dex).unwrap();
    let Rule::Dex { flags } = &dex.rule else {
      panic!("expected dex");
    };
    assert!(flags.contains(&"--min-sdk-version=19".to_string()));
  }

  #[test]
  fn default_sdk_uses_platform_min_sdk_and_env_flags() {
    let mut graph = ModuleGraph::new(&blueprint(
      r#"{
        "platform": { "default_app_target_sdk": 27 },
        "modules": [{ "type": "java_library", "name": "app", "dir": "app", "srcs": ["src/*.java"] }]
      }"#,
    ))
    .unwrap();
    add_platform_runtime(&mut graph);
    let env = EnvOverrides {
      no_optimize_dx: true,
      ..Default::default()
    };
    let plan = plan_with(&graph, &sources(), env);

    let app = module(&plan, "app", Target::Device);
    let dex = app.transforms.iter().find(|t| t.stage() == Stage::Dex).unwrap();
    let Rule::Dex { flags } = &dex.rule else {
      panic!("expected dex");
    };
    assert_eq!(flags, &vec!["--no-optimize".to_string(), "--min-sdk-version=27".to_string()]);
  }
}

mod determinism {
  use super::*;

  const BLUEPRINT: &str = r#"{ "modules": [
    { "type": "java_defaults", "name": "common", "javacflags": ["-Xlint"] },
    { "type": "java_library_host", "name": "okio", "dir": "okio", "srcs": ["*.java"] },
    {
      "type": "java_library",
      "name": "app",
      "dir": "app",
      "defaults": ["common"],
      "srcs": ["src/*.java"],
      "static_libs": ["okio"],
      "host_supported": true,
      "sdk_version": "current"
    }
  ] }"#;

  #[test]
  fn declaring_twice_yields_identical_edges() {
    let first = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
    let second = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();

    for target in [Target::Device, Target::Host] {
      let a = serde_json::to_vec(&first.declared_deps("app", target)).unwrap();
      let b = serde_json::to_vec(&second.declared_deps("app", target)).unwrap();
      assert_eq!(a, b);
    }
  }

  #[test]
  fn plan_hash_is_stable_across_runs() {
    let graph = ModuleGraph::new(&blueprint(BLUEPRINT)).unwrap();
    let first = plan_with(&graph, &sources(), EnvOverrides::default());
    let second = plan_with(&graph, &sources(), EnvOverrides::default());

    assert_eq!(first.hash().unwrap(), second.hash().unwrap());
  }

  #[test]
  fn errorprone_branch_joins_before_packaging() {
    let graph = ModuleGraph::new(&blueprint(
      r#"{ "modules": [
        { "type": "java_library_host", "name": "okio", "dir": "okio", "srcs": ["*.java"], "installable": false },
        { "type": "java_library_host", "name": "app", "dir": "app", "srcs": ["src/*.java"], "static_libs": ["okio"] }
      ] }"#,
    ))
    .unwrap();
    let env = EnvOverrides {
      run_error_prone: true,
      ..Default::default()
    };
    let plan = plan_with(&graph, &sources(), env);
    let app = module(&plan, "app", Target::Host);

    assert_eq!(
      stages(app),
      vec![Stage::Compile, Stage::ErrorProne, Stage::Combine, Stage::Install]
    );
    assert_eq!(app.transforms[2].order_only, vec![app.transforms[1].output.clone()]);
  }
}

//! Plan command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_content, fixture_path};

#[test]
fn plan_host_tools() {
  let env = TestEnv::from_fixture("host_tools.json").with_host_tools_sources();

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("util (host, library)"))
    .stdout(predicate::str::contains("tool (host, binary)"))
    .stdout(predicate::str::contains("Modules: 2"))
    .stdout(predicate::str::contains("Plan: "));
}

#[test]
fn plan_json_lists_modules_in_order() {
  let env = TestEnv::from_fixture("host_tools.json").with_host_tools_sources();

  let output = env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .arg("--format")
    .arg("json")
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let names: Vec<&str> = json["plan"]["modules"]
    .as_array()
    .unwrap()
    .iter()
    .map(|m| m["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, vec!["tool", "util"]);
  assert!(json["hash"].as_str().is_some_and(|h| !h.is_empty()));
}

#[test]
fn plan_hash_is_stable_across_runs() {
  let env = TestEnv::from_fixture("host_tools.json").with_host_tools_sources();
  let run = || {
    let output = env
      .jplan_cmd()
      .args(["plan", "--format", "json"])
      .arg(&env.blueprint_path)
      .output()
      .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["hash"].as_str().unwrap().to_string()
  };

  assert_eq!(run(), run());
}

#[test]
fn plan_fails_when_wrapper_is_missing() {
  let env = TestEnv::from_fixture("host_tools.json");
  env.write_file("util/src/com/example/Util.java", "class Util {}");
  env.write_file("tool/src/com/example/Main.java", "class Main {}");

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .assert()
    .failure()
    .stdout(predicate::str::contains("Failed: 1"))
    .stderr(predicate::str::contains("tool (host)"))
    .stderr(predicate::str::contains("Partial plan: "))
    .stderr(predicate::str::contains("1 module(s) failed to plan"));
}

#[test]
fn plan_skips_dependents_of_failed_modules() {
  let env = TestEnv::from_fixture("host_tools.json").with_host_tools_sources();
  env.write_file(
    "blueprint.json",
    &fixture_content("host_tools.json").replace(r#""src/**/*.java"]"#, r#""src/Missing.java"]"#),
  );

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("util (host)"))
    .stderr(predicate::str::contains("tool (host) skipped"));
}

#[test]
fn plan_device_library_with_externals() {
  let env = TestEnv::from_fixture("device_lib.json");
  env.write_file("services/java/com/example/Service.java", "class Service {}");

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .arg("--externals")
    .arg(fixture_path("device_runtime.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("services (device, library)"))
    .stdout(predicate::str::contains("dex"));
}

#[test]
fn plan_device_library_without_runtime_fails() {
  let env = TestEnv::from_fixture("device_lib.json");
  env.write_file("services/java/com/example/Service.java", "class Service {}");

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("core-oj"));
}

#[test]
fn plan_error_prone_adds_a_transform() {
  let env = TestEnv::from_fixture("host_tools.json").with_host_tools_sources();

  env
    .jplan_cmd()
    .env("RUN_ERROR_PRONE", "true")
    .arg("plan")
    .arg(&env.blueprint_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("errorprone"));
}

#[test]
fn plan_with_explicit_root() {
  let env = TestEnv::from_fixture("host_tools.json");
  env.write_file("tree/util/src/Util.java", "class Util {}");
  env.write_file("tree/tool/src/Main.java", "class Main {}");
  env.write_file("tree/tool/tool.sh", "#!/bin/sh\n");

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .arg("--root")
    .arg(env.temp.path().join("tree"))
    .assert()
    .success();
}

#[test]
fn plan_cycle_is_an_error() {
  let env = TestEnv::from_fixture("cycle.json");

  env
    .jplan_cmd()
    .arg("plan")
    .arg(&env.blueprint_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to build module graph"));
}

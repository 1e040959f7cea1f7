//! Deps command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn deps_lists_standard_libraries_for_device() {
  let env = TestEnv::from_fixture("device_lib.json");

  env
    .jplan_cmd()
    .arg("deps")
    .arg(&env.blueprint_path)
    .arg("services")
    .assert()
    .success()
    .stdout(predicate::str::contains("core-oj"))
    .stdout(predicate::str::contains("okhttp"));
}

#[test]
fn deps_host_variant() {
  let env = TestEnv::from_fixture("host_tools.json");

  env
    .jplan_cmd()
    .arg("deps")
    .arg(&env.blueprint_path)
    .arg("tool")
    .arg("--host")
    .assert()
    .success()
    .stdout(predicate::str::contains("util"))
    .stdout(predicate::str::contains("core-oj").not());
}

#[test]
fn deps_without_edges() {
  let env = TestEnv::from_fixture("host_tools.json");

  env
    .jplan_cmd()
    .arg("deps")
    .arg(&env.blueprint_path)
    .arg("util")
    .arg("--host")
    .assert()
    .success()
    .stdout(predicate::str::contains("declares no dependencies"));
}

#[test]
fn deps_unknown_module_fails() {
  let env = TestEnv::from_fixture("host_tools.json");

  env
    .jplan_cmd()
    .arg("deps")
    .arg(&env.blueprint_path)
    .arg("missing")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No device variant"));
}

//! Waves command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn waves_put_dependencies_first() {
  let env = TestEnv::from_fixture("host_tools.json");

  let output = env
    .jplan_cmd()
    .arg("waves")
    .arg(&env.blueprint_path)
    .output()
    .unwrap();
  assert!(output.status.success());

  let stdout = String::from_utf8(output.stdout).unwrap();
  let util = stdout.find("util (host)").unwrap();
  let tool = stdout.find("tool (host)").unwrap();
  assert!(util < tool);
  assert!(stdout.contains("Wave 1:"));
  assert!(stdout.contains("Variants: 2"));
  assert!(stdout.contains("Waves: 2"));
}

#[test]
fn waves_missing_blueprint_fails() {
  let env = TestEnv::from_fixture("host_tools.json");

  env
    .jplan_cmd()
    .arg("waves")
    .arg(env.temp.path().join("nope.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load blueprint"));
}

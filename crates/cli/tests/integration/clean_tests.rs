//! Tests for `coverbuild --clean`.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn clean_removes_build_directories() {
  let env = TestEnv::empty();
  env.write_file("build/popup_compiled.js", "x");
  env.write_file("build/styles/popup.css", "x");
  env.write_file("build_gen/src/popup.soy.js", "x");
  env.write_file("src/popup.js", "source");

  env
    .coverbuild_cmd()
    .arg("--clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed build"));

  assert!(!env.path("build").exists());
  assert!(!env.path("build_gen").exists());
  assert!(env.path("src/popup.js").exists());
}

#[test]
fn clean_without_directories_is_a_noop() {
  let env = TestEnv::empty();

  env
    .coverbuild_cmd()
    .arg("--clean")
    .assert()
    .success()
    .stdout(predicate::str::contains("Nothing to clean"))
    .stderr(predicate::str::contains("loaded build config"));

  assert_eq!(std::fs::read_dir(env.root()).unwrap().count(), 0);
}

#[test]
#[cfg(unix)]
fn clean_runs_no_compiler() {
  let env = TestEnv::empty();
  env.write_file("build/popup_compiled.js", "x");
  let marker = env.path("compiler-ran");
  let java = env.write_script("bin/java", &format!("#!/bin/sh\ntouch {:?}\n", marker.display().to_string()));
  env.write_file(
    "coverbuild.json",
    &format!(
      r#"{{ "tools": {{ "java": {:?}, "python": {:?} }} }}"#,
      java.display().to_string(),
      java.display().to_string()
    ),
  );

  env.coverbuild_cmd().arg("--clean").assert().success();

  assert!(!marker.exists());
  assert!(!env.path("build").exists());
}

#[test]
fn clean_honors_root_env_var() {
  let env = TestEnv::empty();
  env.write_file("build/popup_compiled.js", "x");
  let elsewhere = TestEnv::empty();

  elsewhere
    .coverbuild_cmd()
    .env("COVERBUILD_ROOT", env.root())
    .arg("--clean")
    .assert()
    .success();

  assert!(!env.path("build").exists());
}

//! Tests for the default build command.
//!
//! The compilers are replaced by shell scripts and every tool dependency is
//! pre-provisioned, so no test touches the network or needs a JVM.

#![cfg(unix)]

use predicates::prelude::*;

use super::common::{FAILING_COMPILER, FAKE_COMPILER, TestEnv, count_files};

#[test]
fn build_produces_extension_directory() {
  let env = TestEnv::project(FAKE_COMPILER, FAKE_COMPILER);

  env
    .coverbuild_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("4 bundles"))
    .stderr(predicate::str::contains("ERROR").not());

  assert_eq!(count_files(&env.path("build_gen/src"), ".soy.js"), 2);
  assert_eq!(count_files(&env.path("build"), "_compiled.js"), 4);
  assert!(env.path("build/styles/popup.css").exists());
  assert!(env.path("build/third_party/lib/LICENSE").exists());
  for file in ["popup.html", "manifest.json", "brticon.png"] {
    assert!(env.path("build").join(file).exists(), "{} missing", file);
  }
}

#[test]
fn rebuild_replaces_stale_styles() {
  let env = TestEnv::project(FAKE_COMPILER, FAKE_COMPILER);
  env.write_file("build/styles/stale.css", "old");

  env.coverbuild_cmd().assert().success();
  env.coverbuild_cmd().assert().success();

  assert!(!env.path("build/styles/stale.css").exists());
  assert!(env.path("build/styles/popup.css").exists());
}

#[test]
fn template_failure_names_template_and_skips_bundles() {
  let env = TestEnv::project(FAILING_COMPILER, FAKE_COMPILER);

  env
    .coverbuild_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("coverage_report.soy"))
    .stderr(predicate::str::contains("template syntax error"));

  assert_eq!(count_files(&env.path("build"), "_compiled.js"), 0);
  assert!(!env.path("build/manifest.json").exists());
}

#[test]
fn bundle_failure_names_bundle() {
  let env = TestEnv::project(FAKE_COMPILER, FAILING_COMPILER);

  env
    .coverbuild_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("content_compiled.js"));

  assert_eq!(count_files(&env.path("build_gen/src"), ".soy.js"), 2);
  assert!(!env.path("build/styles").exists());
}

#[test]
fn missing_library_checkout_is_reported() {
  let env = TestEnv::project(FAKE_COMPILER, FAKE_COMPILER);
  std::fs::remove_dir(env.path("closure-library")).unwrap();
  let svn = env.write_script("bin/svn", "#!/bin/sh\nexit 1\n");
  env.write_file(
    "coverbuild.json",
    &format!(
      r#"{{ "library": {{ "source": {{ "type": "command", "program": {:?}, "args": ["checkout"] }} }} }}"#,
      svn.display().to_string()
    ),
  );

  env
    .coverbuild_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("could not set up closure-library"));
}

#[test]
fn malformed_config_is_reported() {
  let env = TestEnv::project(FAKE_COMPILER, FAKE_COMPILER);
  env.write_file("coverbuild.json", "{ nope");

  env
    .coverbuild_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load build config"));
}

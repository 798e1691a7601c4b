//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for both compilers: writes whichever output file the command
/// line names and exits zero.
pub const FAKE_COMPILER: &str = r#"#!/bin/sh
out=""
prev=""
for arg in "$@"; do
  case "$prev" in
    --outputPathFormat) out="$arg" ;;
  esac
  case "$arg" in
    --output_file=*) out="${arg#--output_file=}" ;;
  esac
  prev="$arg"
done
[ -n "$out" ] || { echo "no output argument" >&2; exit 2; }
mkdir -p "$(dirname "$out")"
echo "// compiled" > "$out"
"#;

/// Stand-in compiler that always fails.
pub const FAILING_COMPILER: &str = "#!/bin/sh\necho \"template syntax error\" >&2\nexit 1\n";

/// Isolated project tree.
///
/// Each test gets its own temporary project root with sources, pre-provisioned
/// tool artifacts, and a `coverbuild.json` pointing the compilers at scripts.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty project root.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create a project with sources and tools in place, compiled by `java` and
  /// `python` stand-in scripts.
  pub fn project(java: &str, python: &str) -> Self {
    let env = Self::empty();
    env.seed_sources();
    env.seed_tools();
    let java = env.write_script("bin/java", java);
    let python = env.write_script("bin/python", python);
    env.write_file(
      "coverbuild.json",
      &format!(
        r#"{{ "tools": {{ "java": {:?}, "python": {:?} }} }}"#,
        java.display().to_string(),
        python.display().to_string()
      ),
    );
    env
  }

  pub fn root(&self) -> PathBuf {
    let p = self.temp.path().to_path_buf();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.root().join(relative)
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.path(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write an executable script and return its absolute path.
  pub fn write_script(&self, relative_path: &str, content: &str) -> PathBuf {
    self.write_file(relative_path, content);
    let path = self.path(relative_path);
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
  }

  fn seed_sources(&self) {
    for template in ["coverage_report.soy", "popup.soy"] {
      self.write_file(&format!("src/{}", template), "{namespace brt.content.Templates}\n");
    }
    for script in [
      "scriptLoader.js",
      "instrumentation.js",
      "startTool.js",
      "showCoverageHelper.js",
      "background.js",
      "backgroundInteraction.js",
      "popup.js",
    ] {
      self.write_file(&format!("src/{}", script), "goog.provide('brt');\n");
    }
    self.write_file("src/styles/popup.css", "body {}\n");
    self.write_file("src/third_party/lib/LICENSE", "license\n");
    for file in ["popup.html", "manifest.json", "brticon.png"] {
      self.write_file(&format!("src/{}", file), "static\n");
    }
  }

  fn seed_tools(&self) {
    std::fs::create_dir_all(self.path("closure-library")).unwrap();
    self.write_file("compiler.jar", "jar");
    self.write_file("SoyToJsSrcCompiler.jar", "jar");
    self.write_file("build_gen/soyutils_usegoog.js", "// utils");
  }

  /// Get a Command for the coverbuild binary running in this project.
  pub fn coverbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("coverbuild");
    cmd.current_dir(self.root());
    cmd.env_remove("COVERBUILD_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Count regular files directly inside `dir` whose name ends with `suffix`.
pub fn count_files(dir: &Path, suffix: &str) -> usize {
  std::fs::read_dir(dir)
    .map(|entries| {
      entries
        .flatten()
        .filter(|e| e.path().is_file() && e.file_name().to_string_lossy().ends_with(suffix))
        .count()
    })
    .unwrap_or(0)
}

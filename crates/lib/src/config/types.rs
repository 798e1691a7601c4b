//! Declarative build configuration.
//!
//! Every fixed list the build works through (templates, bundles, assets) and
//! every tool location lives here as data. [`Default`] reproduces the
//! extension's own build; a `coverbuild.json` may override any section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete build description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
  pub layout: LayoutConfig,
  pub tools: ToolsConfig,
  pub library: LibraryDependency,
  pub compiler: ArchiveDependency,
  pub template_compiler: ArchiveDependency,
  /// Template files, relative to the sources root, compiled in order.
  pub templates: Vec<PathBuf>,
  /// Script bundles, compiled in order.
  pub targets: Vec<BuildTarget>,
  /// Extra flags forwarded to the script compiler for every bundle.
  pub compiler_flags: Vec<String>,
  pub assets: AssetConfig,
}

/// The three directory roots of the project, relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
  pub source_dir: PathBuf,
  pub output_dir: PathBuf,
  pub generated_dir: PathBuf,
}

/// External programs and the tool artifacts they are pointed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
  pub java: String,
  pub python: String,
  /// Dependency-resolving builder script, relative to the library checkout.
  pub builder_script: PathBuf,
  pub compiler_jar: PathBuf,
  pub template_compiler_jar: PathBuf,
}

/// The JavaScript library checked out next to the sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryDependency {
  pub path: PathBuf,
  pub source: CheckoutSource,
}

/// How the library checkout is obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CheckoutSource {
  /// Run an external checkout command from the project root. The library
  /// path is appended as the final argument.
  Command { program: String, args: Vec<String> },
  /// Clone a git repository in-process.
  Git { url: String },
}

/// A zip archive from which specific members are extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveDependency {
  pub url: String,
  /// Expected lowercase hex SHA256 of the archive, if pinned.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sha256: Option<String>,
  pub members: Vec<ArchiveMember>,
}

/// One archive member and where it lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveMember {
  pub name: String,
  /// Destination, relative to `root`.
  pub dest: PathBuf,
  #[serde(default)]
  pub root: MemberRoot,
}

/// The directory an archive member's destination is relative to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRoot {
  #[default]
  Project,
  /// The generated-sources root, so the file is resolvable by the compiler
  /// and removed by a clean.
  Generated,
}

/// A compiled bundle: output file name plus its ordered inputs.
///
/// Input order is significant to the compiler and is preserved on the
/// command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildTarget {
  /// File name inside the output root.
  pub output: PathBuf,
  /// File names inside the sources root.
  pub inputs: Vec<PathBuf>,
}

/// Static deliverables copied verbatim from the sources root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
  /// Directories replaced wholesale on every build.
  pub directories: Vec<PathBuf>,
  /// Files copied into the output root, overwriting.
  pub files: Vec<PathBuf>,
}

impl BuildTarget {
  pub fn new<I, P>(output: impl Into<PathBuf>, inputs: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
  {
    Self {
      output: output.into(),
      inputs: inputs.into_iter().map(Into::into).collect(),
    }
  }
}

impl ArchiveMember {
  pub fn new(name: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      dest: dest.into(),
      root: MemberRoot::Project,
    }
  }

  pub fn generated(name: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
    Self {
      root: MemberRoot::Generated,
      ..Self::new(name, dest)
    }
  }
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      layout: LayoutConfig::default(),
      tools: ToolsConfig::default(),
      library: LibraryDependency::default(),
      compiler: ArchiveDependency {
        url: "http://closure-compiler.googlecode.com/files/compiler-latest.zip".to_string(),
        sha256: None,
        members: vec![ArchiveMember::new("compiler.jar", "compiler.jar")],
      },
      template_compiler: ArchiveDependency {
        url: "http://closure-templates.googlecode.com/files/closure-templates-for-javascript-latest.zip".to_string(),
        sha256: None,
        members: vec![
          ArchiveMember::new("SoyToJsSrcCompiler.jar", "SoyToJsSrcCompiler.jar"),
          ArchiveMember::generated("soyutils_usegoog.js", "soyutils_usegoog.js"),
        ],
      },
      templates: vec!["coverage_report.soy".into(), "popup.soy".into()],
      targets: vec![
        BuildTarget::new(
          "content_compiled.js",
          ["scriptLoader.js", "instrumentation.js", "startTool.js"],
        ),
        BuildTarget::new("background_compiled.js", ["showCoverageHelper.js", "background.js"]),
        BuildTarget::new("inject_compiled.js", ["backgroundInteraction.js"]),
        BuildTarget::new("popup_compiled.js", ["popup.js", "background.js"]),
      ],
      compiler_flags: Vec::new(),
      assets: AssetConfig::default(),
    }
  }
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      source_dir: "src".into(),
      output_dir: "build".into(),
      generated_dir: "build_gen".into(),
    }
  }
}

impl Default for ToolsConfig {
  fn default() -> Self {
    Self {
      java: "java".to_string(),
      python: "python".to_string(),
      builder_script: ["closure", "bin", "build", "closurebuilder.py"]
        .iter()
        .collect(),
      compiler_jar: "compiler.jar".into(),
      template_compiler_jar: "SoyToJsSrcCompiler.jar".into(),
    }
  }
}

impl Default for LibraryDependency {
  fn default() -> Self {
    Self {
      path: "closure-library".into(),
      source: CheckoutSource::Command {
        program: "svn".to_string(),
        args: vec![
          "checkout".to_string(),
          "http://closure-library.googlecode.com/svn/trunk/".to_string(),
        ],
      },
    }
  }
}

impl Default for AssetConfig {
  fn default() -> Self {
    Self {
      directories: vec!["styles".into(), "third_party".into()],
      files: vec!["popup.html".into(), "manifest.json".into(), "brticon.png".into()],
    }
  }
}

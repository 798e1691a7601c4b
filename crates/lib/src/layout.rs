//! Project root discovery and the directory layout of a build.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ArchiveMember, BuildConfig, LayoutConfig, MemberRoot};
use crate::consts::{CONFIG_FILENAME, ROOT_ENV_VAR, TEMPLATE_OUTPUT_SUFFIX};

/// Returns the project root: `$COVERBUILD_ROOT` if set, else the current directory.
pub fn project_root() -> io::Result<PathBuf> {
  match std::env::var_os(ROOT_ENV_VAR) {
    Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
    _ => std::env::current_dir(),
  }
}

/// Returns the config file path for a project root.
pub fn config_path(root: &Path) -> PathBuf {
  root.join(CONFIG_FILENAME)
}

/// Resolved directory roots of one project.
///
/// Relative paths (`source_dir`, `output_dir`, `generated_dir`) are what
/// external tools see on their command lines, since every command runs from
/// the project root. [`Layout::resolve`] turns them into absolute paths for
/// filesystem checks.
#[derive(Debug, Clone)]
pub struct Layout {
  root: PathBuf,
  dirs: LayoutConfig,
}

impl Layout {
  pub fn new(root: impl Into<PathBuf>, config: &BuildConfig) -> Self {
    Self {
      root: root.into(),
      dirs: config.layout.clone(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn source_dir(&self) -> &Path {
    &self.dirs.source_dir
  }

  pub fn output_dir(&self) -> &Path {
    &self.dirs.output_dir
  }

  pub fn generated_dir(&self) -> &Path {
    &self.dirs.generated_dir
  }

  /// Absolute path of a root-relative path.
  pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
    self.root.join(relative)
  }

  /// Root-relative path of a file inside the sources root.
  pub fn source(&self, name: impl AsRef<Path>) -> PathBuf {
    self.dirs.source_dir.join(name)
  }

  /// Root-relative path of a file inside the output root.
  pub fn output(&self, name: impl AsRef<Path>) -> PathBuf {
    self.dirs.output_dir.join(name)
  }

  /// Root-relative destination of an extracted archive member.
  pub fn member_dest(&self, member: &ArchiveMember) -> PathBuf {
    match member.root {
      MemberRoot::Project => member.dest.clone(),
      MemberRoot::Generated => self.dirs.generated_dir.join(&member.dest),
    }
  }

  /// Root-relative path of the script generated from a template source.
  ///
  /// `src/popup.soy` becomes `build_gen/src/popup.soy.js`.
  pub fn template_output(&self, source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_owned();
    name.push(TEMPLATE_OUTPUT_SUFFIX);
    self.dirs.generated_dir.join(name)
  }
}

//! Static asset assembly.
//!
//! Directories are replaced, never merged: a file removed from a source
//! directory disappears from the output on the next build. Individual files
//! are copied into the output root, overwriting.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::AssetConfig;
use crate::error::BuildError;
use crate::layout::Layout;

/// Copy every configured asset into the output root.
///
/// Returns the root-relative destinations, directories first.
pub fn assemble(assets: &AssetConfig, layout: &Layout) -> Result<Vec<PathBuf>, BuildError> {
  info!("assembling static assets");
  let mut copied = Vec::new();

  for dir in &assets.directories {
    let dest = layout.output(dir);
    replace_dir(&layout.resolve(layout.source(dir)), &layout.resolve(&dest))?;
    copied.push(dest);
  }

  for file in &assets.files {
    let source = layout.resolve(layout.source(file));
    let name = file.file_name().unwrap_or(file.as_os_str());
    let dest = layout.output(name);
    debug!(from = %source.display(), to = %dest.display(), "copying file");
    fs::copy(&source, layout.resolve(&dest)).map_err(BuildError::io("copy", source))?;
    copied.push(dest);
  }

  Ok(copied)
}

/// Remove `dest` if present, then copy the tree at `source` there.
pub fn replace_dir(source: &Path, dest: &Path) -> Result<(), BuildError> {
  if dest.exists() {
    debug!(path = %dest.display(), "removing previous copy");
    fs::remove_dir_all(dest).map_err(BuildError::io("remove", dest))?;
  }
  copy_tree(source, dest)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<(), BuildError> {
  debug!(from = %source.display(), to = %dest.display(), "copying directory");

  for entry in WalkDir::new(source).follow_links(true) {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(source).to_path_buf();
      BuildError::io("read", path)(e.into())
    })?;
    let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
    let target = dest.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).map_err(BuildError::io("create directory", &target))?;
    } else {
      fs::copy(entry.path(), &target).map_err(BuildError::io("copy", entry.path()))?;
    }
  }

  Ok(())
}

//! Extraction of named members from zip archives.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur while extracting from an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
  /// The archive could not be opened or read as a zip file.
  #[error("failed to read archive '{}': {source}", path.display())]
  Open {
    path: PathBuf,
    #[source]
    source: ZipError,
  },

  /// The archive has no member with the requested name.
  #[error("archive has no member named '{0}'")]
  MissingMember(String),

  /// Writing the extracted member failed.
  #[error("failed to write '{}': {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Copy the member `name` of the zip at `archive` to `dest`.
///
/// Parent directories of `dest` are created. An existing file at `dest` is
/// overwritten.
pub fn extract_member(archive: &Path, name: &str, dest: &Path) -> Result<(), ArchiveError> {
  let open_err = |source: ZipError| ArchiveError::Open {
    path: archive.to_path_buf(),
    source,
  };
  let write_err = |source: io::Error| ArchiveError::Write {
    path: dest.to_path_buf(),
    source,
  };

  let file = File::open(archive).map_err(|e| open_err(ZipError::Io(e)))?;
  let mut zip = ZipArchive::new(file).map_err(open_err)?;

  let mut entry = match zip.by_name(name) {
    Ok(entry) => entry,
    Err(ZipError::FileNotFound) => return Err(ArchiveError::MissingMember(name.to_string())),
    Err(e) => return Err(open_err(e)),
  };

  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent).map_err(write_err)?;
  }

  let mut out = File::create(dest).map_err(write_err)?;
  let written = io::copy(&mut entry, &mut out).map_err(write_err)?;

  debug!(member = name, dest = %dest.display(), bytes = written, "extracted archive member");
  Ok(())
}

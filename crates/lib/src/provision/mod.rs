//! Tool dependency provisioning.
//!
//! Before anything is compiled the build needs three external artifacts on
//! disk: the library checkout, the script compiler jar, and the template
//! compiler jar together with its runtime support script. Presence is the only
//! check. A present artifact is never refreshed, so a second run with
//! everything in place does no network or extraction work.

pub mod archive;
pub mod checkout;
pub mod fetch;

use std::path::Path;

use tracing::{debug, info};

use crate::config::{ArchiveDependency, BuildConfig, CheckoutSource, LibraryDependency};
use crate::error::BuildError;
use crate::layout::Layout;
use crate::process::CommandRunner;

pub use fetch::{Downloader, HttpDownloader};

/// Ensure every tool dependency exists, fetching what is missing.
///
/// Returns the names of the artifacts that were fetched by this call.
pub async fn provision<R, D>(
  config: &BuildConfig,
  layout: &Layout,
  runner: &R,
  downloader: &D,
) -> Result<Vec<String>, BuildError>
where
  R: CommandRunner,
  D: Downloader,
{
  info!("provisioning tool dependencies");
  let mut fetched = Vec::new();

  if ensure_library(&config.library, layout, runner).await? {
    fetched.push(config.library.path.display().to_string());
  }

  for archive in [&config.compiler, &config.template_compiler] {
    fetched.extend(ensure_archive(archive, layout, downloader).await?);
  }

  Ok(fetched)
}

/// Check out the library if its directory is absent.
///
/// Returns true if a checkout was performed.
async fn ensure_library<R: CommandRunner>(
  library: &LibraryDependency,
  layout: &Layout,
  runner: &R,
) -> Result<bool, BuildError> {
  let artifact = library.path.display().to_string();
  let dest = layout.resolve(&library.path);

  if dest.exists() {
    debug!(path = %dest.display(), "library already present");
    return Ok(false);
  }

  info!(path = %dest.display(), "checking out library");
  match &library.source {
    CheckoutSource::Command { program, args } => {
      checkout::checkout_with_command(runner, program, args, &library.path, layout.root())
        .await
        .map_err(|e| BuildError::setup(&artifact, e))?;
    }
    CheckoutSource::Git { url } => {
      checkout::checkout_with_git(url, &dest)
        .await
        .map_err(|e| BuildError::setup(&artifact, e))?;
    }
  }

  if !dest.exists() {
    return Err(BuildError::setup(
      artifact,
      format!(
        "checkout did not produce '{}'; check out the library there manually",
        dest.display()
      ),
    ));
  }

  Ok(true)
}

/// Download and extract an archive if any of its members is absent.
///
/// Returns the destinations of the members that were extracted.
async fn ensure_archive<D: Downloader>(
  archive: &ArchiveDependency,
  layout: &Layout,
  downloader: &D,
) -> Result<Vec<String>, BuildError> {
  let all_present = archive
    .members
    .iter()
    .all(|m| layout.resolve(layout.member_dest(m)).exists());
  if all_present {
    debug!(url = %archive.url, "archive members already present");
    return Ok(Vec::new());
  }

  // Name setup failures after the first member, which is the tool itself.
  let artifact = archive
    .members
    .first()
    .map(|m| layout.member_dest(m).display().to_string())
    .unwrap_or_else(|| archive.url.clone());

  let scratch = tempfile::tempdir().map_err(|e| BuildError::setup(&artifact, e))?;
  let zip_path = scratch.path().join("download.zip");

  downloader
    .download(&archive.url, &zip_path)
    .await
    .map_err(|e| BuildError::setup(&artifact, e))?;

  if let Some(expected) = &archive.sha256 {
    fetch::verify_sha256(&archive.url, &zip_path, expected)
      .await
      .map_err(|e| BuildError::setup(&artifact, e))?;
  }

  let extracted = extract_members(archive, layout, &zip_path, &artifact).await?;

  for member in &archive.members {
    let relative = layout.member_dest(member);
    let dest = layout.resolve(&relative);
    if !dest.exists() {
      return Err(BuildError::setup(
        relative.display().to_string(),
        format!("'{}' is missing after extracting {}", dest.display(), archive.url),
      ));
    }
  }

  Ok(extracted)
}

async fn extract_members(
  archive: &ArchiveDependency,
  layout: &Layout,
  zip_path: &Path,
  artifact: &str,
) -> Result<Vec<String>, BuildError> {
  let members: Vec<_> = archive
    .members
    .iter()
    .map(|m| {
      let dest = layout.member_dest(m);
      let abs_dest = layout.resolve(&dest);
      (m.name.clone(), dest, abs_dest)
    })
    .collect();
  let zip_path = zip_path.to_path_buf();

  let result = tokio::task::spawn_blocking(move || {
    let mut extracted = Vec::new();
    for (name, dest, abs_dest) in members {
      archive::extract_member(&zip_path, &name, &abs_dest)
        .map_err(|e| BuildError::setup(dest.display().to_string(), e))?;
      extracted.push(dest.display().to_string());
    }
    Ok::<_, BuildError>(extracted)
  })
  .await;

  match result {
    Ok(extracted) => extracted,
    Err(e) => Err(BuildError::setup(artifact, e)),
  }
}

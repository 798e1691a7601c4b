//! Library checkout.
//!
//! The library is obtained either by running an external checkout command
//! (the historical `svn checkout`) or by cloning a git repository in-process.
//! Either way the only contract is that the checkout directory exists
//! afterwards; the caller verifies that.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::process::{CommandLine, CommandRunner, RunError};

/// Errors that can occur while checking out the library.
#[derive(Debug, Error)]
pub enum CheckoutError {
  /// The checkout command could not be launched.
  #[error(transparent)]
  Run(#[from] RunError),

  /// Failed to clone a git repository.
  #[error("failed to clone repository '{url}': {source}")]
  Clone {
    url: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// Failed to check out the cloned worktree.
  #[error("failed to checkout '{url}': {source}")]
  Checkout {
    url: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// The blocking clone task panicked or was cancelled.
  #[error("clone task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

/// Run an external checkout command from the project root, with `dest`
/// appended as the checkout target.
///
/// A non-zero exit is not an error here. The caller judges success by the
/// presence of the checkout directory alone.
pub async fn checkout_with_command<R: CommandRunner>(
  runner: &R,
  program: &str,
  args: &[String],
  dest: &Path,
  root: &Path,
) -> Result<(), CheckoutError> {
  let command = CommandLine::new(program).args(args).arg(dest);
  let outcome = runner.run(&command, root).await?;
  if !outcome.success() {
    debug!(command = %command, "checkout command {}", outcome.describe_failure());
  }
  Ok(())
}

/// Clone `url` into `dest`, checking out the default branch.
///
/// Returns the checked-out commit hash.
pub async fn checkout_with_git(url: &str, dest: &Path) -> Result<String, CheckoutError> {
  let url = url.to_string();
  let dest = dest.to_path_buf();
  tokio::task::spawn_blocking(move || clone_repo(&url, &dest)).await?
}

fn clone_repo(url: &str, dest: &Path) -> Result<String, CheckoutError> {
  info!(url, path = %dest.display(), "cloning repository");

  let mut prepared = gix::prepare_clone(url, dest).map_err(|e| CheckoutError::Clone {
    url: url.to_string(),
    source: Box::new(e),
  })?;

  let (mut checkout, _outcome) = prepared
    .fetch_then_checkout(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
    .map_err(|e| CheckoutError::Clone {
      url: url.to_string(),
      source: Box::new(e),
    })?;

  let (repo, _outcome) = checkout
    .main_worktree(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
    .map_err(|e| CheckoutError::Checkout {
      url: url.to_string(),
      source: Box::new(e),
    })?;

  let mut head = repo.head().map_err(|e| CheckoutError::Checkout {
    url: url.to_string(),
    source: Box::new(e),
  })?;
  let commit = head.peel_to_commit().map_err(|e| CheckoutError::Checkout {
    url: url.to_string(),
    source: Box::new(e),
  })?;

  let rev = commit.id.to_string();
  debug!(url, rev = %rev, "cloned repository");
  Ok(rev)
}

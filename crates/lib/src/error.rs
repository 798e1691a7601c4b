//! The build failure taxonomy.
//!
//! Every phase reports failures through [`BuildError`]. Each variant names the
//! phase and the artifact that failed so the message alone tells the user what
//! to fix. Nothing is retried: the first error ends the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a build or clean run.
#[derive(Debug, Error)]
pub enum BuildError {
  /// A tool dependency could not be fetched, extracted, or found afterwards.
  #[error("could not set up {artifact}: {reason}")]
  Setup { artifact: String, reason: String },

  /// The template compiler failed on a template.
  #[error("failed while compiling the template {}: {reason}", template.display())]
  TemplateCompile { template: PathBuf, reason: String },

  /// The script compiler failed on a bundle.
  #[error("failed while compiling to {}: {reason}", output.display())]
  ScriptCompile { output: PathBuf, reason: String },

  /// A filesystem operation on the build tree failed.
  #[error("failed to {action} '{}': {source}", path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The build configuration could not be loaded.
  #[error(transparent)]
  Config(#[from] ConfigError),
}

impl BuildError {
  pub(crate) fn setup(artifact: impl Into<String>, reason: impl ToString) -> Self {
    BuildError::Setup {
      artifact: artifact.into(),
      reason: reason.to_string(),
    }
  }

  pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| BuildError::Io { action, path, source }
  }
}

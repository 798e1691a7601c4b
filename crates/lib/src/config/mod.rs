//! Build configuration loading and validation.
//!
//! The configuration is optional: without a `coverbuild.json` in the project
//! root the built-in defaults describe the whole build. A present file only
//! needs to name the sections it changes.
//!
//! ```json
//! {
//!   "tools": { "java": "/usr/lib/jvm/java-8/bin/java" },
//!   "library": {
//!     "source": { "type": "git", "url": "https://github.com/google/closure-library.git" }
//!   },
//!   "compiler_flags": ["--compilation_level=ADVANCED_OPTIMIZATIONS"]
//! }
//! ```

mod types;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use types::*;

/// Errors that can occur while loading the build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the config file.
  #[error("failed to read config file '{}': {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse the config file JSON.
  #[error("failed to parse config file '{}': {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// The configuration is structurally invalid.
  #[error("invalid build configuration: {0}")]
  Invalid(String),
}

impl BuildConfig {
  /// Load the configuration from `path`.
  ///
  /// Returns the defaults if the file doesn't exist. Sections absent from the
  /// file keep their defaults. The result is validated before it is returned.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let config = match fs::read_to_string(path) {
      Ok(content) => {
        debug!(path = %path.display(), "loading build config");
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
          path: path.to_path_buf(),
          source,
        })?
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "no build config, using defaults");
        BuildConfig::default()
      }
      Err(source) => {
        return Err(ConfigError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    config.validate()?;
    Ok(config)
  }

  /// Check the invariants the build relies on.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let layout = &self.layout;
    let relative_paths = [
      ("layout.source_dir", &layout.source_dir),
      ("layout.output_dir", &layout.output_dir),
      ("layout.generated_dir", &layout.generated_dir),
      ("library.path", &self.library.path),
    ];
    for (name, path) in relative_paths {
      if path.is_absolute() || path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(format!(
          "{} must be a non-empty path relative to the project root, got '{}'",
          name,
          path.display()
        )));
      }
    }

    if let Some(template) = self.templates.iter().find(|t| t.as_os_str().is_empty()) {
      return Err(ConfigError::Invalid(format!("empty template name {:?}", template)));
    }

    let mut outputs = HashSet::new();
    for target in &self.targets {
      if target.inputs.is_empty() {
        return Err(ConfigError::Invalid(format!(
          "target '{}' has no inputs",
          target.output.display()
        )));
      }
      if !outputs.insert(&target.output) {
        return Err(ConfigError::Invalid(format!(
          "target '{}' is declared more than once",
          target.output.display()
        )));
      }
    }

    for (name, archive) in [("compiler", &self.compiler), ("template_compiler", &self.template_compiler)] {
      if archive.members.is_empty() {
        return Err(ConfigError::Invalid(format!("archive '{}' extracts no members", name)));
      }
    }

    Ok(())
  }
}

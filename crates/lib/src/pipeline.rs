//! Top-level build controller.
//!
//! Two terminal paths:
//! - [`clean`] removes the output and generated-sources roots and nothing else.
//! - [`Pipeline::build`] prepares the roots, then runs provisioning, template
//!   compilation, bundle compilation, and asset assembly, strictly in that
//!   order. The first error ends the run; no later phase starts.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::assets;
use crate::compile::{compile_scripts, compile_templates};
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::layout::Layout;
use crate::process::{CommandRunner, ProcessRunner};
use crate::provision::{self, Downloader, HttpDownloader};

/// What a successful build produced.
#[derive(Debug, Default, Clone)]
pub struct BuildReport {
  /// Tool artifacts fetched by this run (empty when all were present).
  pub fetched: Vec<String>,
  /// Generated template scripts.
  pub templates: Vec<PathBuf>,
  /// Compiled bundles.
  pub bundles: Vec<PathBuf>,
  /// Copied static directories and files.
  pub assets: Vec<PathBuf>,
}

/// What a clean removed.
#[derive(Debug, Default, Clone)]
pub struct CleanReport {
  pub removed: Vec<PathBuf>,
}

impl CleanReport {
  pub fn is_noop(&self) -> bool {
    self.removed.is_empty()
  }
}

/// Remove the output and generated-sources roots if they exist.
///
/// Runs no external process and performs no other filesystem writes.
pub fn clean(layout: &Layout) -> Result<CleanReport, BuildError> {
  let mut report = CleanReport::default();

  for dir in [layout.output_dir(), layout.generated_dir()] {
    let path = layout.resolve(dir);
    if path.exists() {
      info!(path = %path.display(), "removing directory");
      fs::remove_dir_all(&path).map_err(BuildError::io("remove", &path))?;
      report.removed.push(dir.to_path_buf());
    }
  }

  if report.is_noop() {
    warn!("nothing to clean");
  }
  Ok(report)
}

/// A configured build over one project root.
pub struct Pipeline<R = ProcessRunner, D = HttpDownloader> {
  config: BuildConfig,
  layout: Layout,
  runner: R,
  downloader: D,
}

impl Pipeline {
  /// A pipeline launching real processes and downloading over HTTP.
  pub fn new(root: impl Into<PathBuf>, config: BuildConfig) -> Self {
    Self::with_parts(root, config, ProcessRunner, HttpDownloader::new())
  }
}

impl<R: CommandRunner, D: Downloader> Pipeline<R, D> {
  pub fn with_parts(root: impl Into<PathBuf>, config: BuildConfig, runner: R, downloader: D) -> Self {
    let layout = Layout::new(root, &config);
    Self {
      config,
      layout,
      runner,
      downloader,
    }
  }

  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  /// Run the whole build.
  pub async fn build(&self) -> Result<BuildReport, BuildError> {
    self.prepare_dirs()?;

    let fetched = provision::provision(&self.config, &self.layout, &self.runner, &self.downloader).await?;

    info!(count = self.config.templates.len(), "compiling templates");
    let templates = compile_templates(&self.config, &self.layout, &self.runner).await?;

    info!(count = self.config.targets.len(), "compiling bundles");
    let bundles = compile_scripts(&self.config, &self.layout, &self.runner).await?;

    let assets = assets::assemble(&self.config.assets, &self.layout)?;

    info!(
      templates = templates.len(),
      bundles = bundles.len(),
      assets = assets.len(),
      "build complete"
    );

    Ok(BuildReport {
      fetched,
      templates,
      bundles,
      assets,
    })
  }

  /// Create the output and generated-sources roots, keeping any contents.
  fn prepare_dirs(&self) -> Result<(), BuildError> {
    for dir in [self.layout.output_dir(), self.layout.generated_dir()] {
      let path = self.layout.resolve(dir);
      fs::create_dir_all(&path).map_err(BuildError::io("create directory", &path))?;
    }
    Ok(())
  }
}

//! Implementation of the default build command.
//!
//! Loads the project's build configuration, provisions the toolchain, runs
//! both compilers, and assembles the extension directory.

use std::time::Instant;

use anyhow::{Context, Result};

use coverbuild_lib::config::BuildConfig;
use coverbuild_lib::layout::{config_path, project_root};
use coverbuild_lib::pipeline::Pipeline;

use tracing::info;

use crate::output::{Mark, format_elapsed, status, tally};

/// Execute the build.
///
/// Prints a summary of fetched tools, generated templates, compiled bundles,
/// and copied assets. Any failure aborts the build and is returned.
pub fn cmd_build() -> Result<()> {
  let root = project_root().context("Failed to determine project root")?;
  let config_file = config_path(&root);
  let config = BuildConfig::load(&config_file).context("Failed to load build config")?;
  info!(root = %root.display(), config = %config_file.display(), "loaded build config");
  let pipeline = Pipeline::new(&root, config);

  let started = Instant::now();

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let report = rt.block_on(pipeline.build()).context("Build failed")?;

  for artifact in &report.fetched {
    status(Mark::Changed, format_args!("Fetched {}", artifact));
  }

  status(
    Mark::Changed,
    format_args!(
      "Built {} in {}",
      pipeline.layout().output_dir().display(),
      format_elapsed(started.elapsed())
    ),
  );
  status(
    Mark::Unchanged,
    tally(&[
      (report.templates.len(), "templates"),
      (report.bundles.len(), "bundles"),
      (report.assets.len(), "assets"),
    ]),
  );

  Ok(())
}

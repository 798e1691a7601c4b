//! Implementation of `coverbuild --clean`.

use anyhow::{Context, Result};

use coverbuild_lib::config::BuildConfig;
use coverbuild_lib::layout::{Layout, config_path, project_root};
use coverbuild_lib::pipeline::clean;

use tracing::info;

use crate::output::{Mark, status};

/// Remove the output and generated-sources directories, then stop.
pub fn cmd_clean() -> Result<()> {
  let root = project_root().context("Failed to determine project root")?;
  let config_file = config_path(&root);
  let config = BuildConfig::load(&config_file).context("Failed to load build config")?;
  info!(root = %root.display(), config = %config_file.display(), "loaded build config");
  let layout = Layout::new(&root, &config);

  let report = clean(&layout).context("Clean failed")?;

  if report.is_noop() {
    status(Mark::Unchanged, "Nothing to clean.");
  } else {
    for dir in &report.removed {
      status(Mark::Changed, format_args!("Removed {}", dir.display()));
    }
  }

  Ok(())
}

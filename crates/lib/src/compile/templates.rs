//! Template compilation.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::layout::Layout;
use crate::process::{CommandLine, CommandRunner};

use super::failure_reason;

/// Command line compiling `source` into `output` (both root-relative).
pub fn template_command(config: &BuildConfig, source: &Path, output: &Path) -> CommandLine {
  CommandLine::new(&config.tools.java)
    .arg("-jar")
    .arg(&config.tools.template_compiler_jar)
    .arg("--shouldProvideRequireSoyNamespaces")
    .arg("--outputPathFormat")
    .arg(output)
    .arg(source)
}

/// Compile every configured template, in order.
///
/// Returns the root-relative paths of the generated scripts. The first
/// failure aborts with an error naming the template.
pub async fn compile_templates<R: CommandRunner>(
  config: &BuildConfig,
  layout: &Layout,
  runner: &R,
) -> Result<Vec<PathBuf>, BuildError> {
  let mut generated = Vec::with_capacity(config.templates.len());

  for template in &config.templates {
    let source = layout.source(template);
    let output = layout.template_output(&source);
    info!(template = %source.display(), output = %output.display(), "compiling template");

    let command = template_command(config, &source, &output);
    let result = runner.run(&command, layout.root()).await;

    if let Some(reason) = failure_reason(result, &layout.resolve(&output)) {
      return Err(BuildError::TemplateCompile {
        template: source,
        reason,
      });
    }

    generated.push(output);
  }

  Ok(generated)
}

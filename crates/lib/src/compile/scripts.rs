//! Script bundle compilation.

use std::path::PathBuf;

use tracing::info;

use crate::config::{BuildConfig, BuildTarget};
use crate::error::BuildError;
use crate::layout::Layout;
use crate::process::{CommandLine, CommandRunner};

use super::failure_reason;

/// Command line compiling one bundle.
///
/// Modules resolve from the sources root, the library checkout, and the
/// generated-sources root. Inputs keep their configured order.
pub fn script_command(config: &BuildConfig, layout: &Layout, target: &BuildTarget) -> CommandLine {
  let mut command = CommandLine::new(&config.tools.python)
    .arg(config.library.path.join(&config.tools.builder_script))
    .flag("root", layout.source_dir())
    .flag("root", &config.library.path)
    .flag("root", layout.generated_dir())
    .flag("output_mode", "compiled")
    .flag("output_file", layout.output(&target.output))
    .flag("compiler_jar", &config.tools.compiler_jar);

  for flag in &config.compiler_flags {
    command = command.flag("compiler_flags", flag);
  }
  for input in &target.inputs {
    command = command.flag("input", layout.source(input));
  }
  command
}

/// Compile every configured bundle, in order.
///
/// Returns the root-relative paths of the compiled bundles. The first failure
/// aborts the remaining targets with an error naming the bundle.
pub async fn compile_scripts<R: CommandRunner>(
  config: &BuildConfig,
  layout: &Layout,
  runner: &R,
) -> Result<Vec<PathBuf>, BuildError> {
  let mut bundles = Vec::with_capacity(config.targets.len());

  for target in &config.targets {
    let output = layout.output(&target.output);
    info!(output = %output.display(), inputs = target.inputs.len(), "compiling bundle");

    let command = script_command(config, layout, target);
    let result = runner.run(&command, layout.root()).await;

    if let Some(reason) = failure_reason(result, &layout.resolve(&output)) {
      return Err(BuildError::ScriptCompile { output, reason });
    }

    bundles.push(output);
  }

  Ok(bundles)
}

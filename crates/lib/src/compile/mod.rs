//! Drivers for the two external compilers.
//!
//! Neither driver knows anything about what the compilers do. A unit of work
//! counts as built only when the process exits with code zero *and* the
//! output file exists afterwards.

pub mod scripts;
pub mod templates;

use std::path::Path;

use crate::process::{RunError, RunOutcome};

pub use scripts::{compile_scripts, script_command};
pub use templates::{compile_templates, template_command};

/// Why a compiler invocation did not produce its output, or `None` on success.
pub(crate) fn failure_reason(result: Result<RunOutcome, RunError>, output: &Path) -> Option<String> {
  match result {
    Err(e) => Some(e.to_string()),
    Ok(outcome) if !outcome.success() => Some(outcome.describe_failure()),
    Ok(_) if !output.exists() => Some("output file was not produced".to_string()),
    Ok(_) => None,
  }
}

//! External process execution.
//!
//! Every external tool (checkout command, template compiler, script compiler)
//! is launched through a [`CommandRunner`]. The command line is a structured
//! program + argument list so paths are never re-split on whitespace.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum RunError {
  /// The program could not be started at all.
  #[error("could not launch '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
  pub program: OsString,
  pub args: Vec<OsString>,
}

impl CommandLine {
  pub fn new(program: impl Into<OsString>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Append `--{name}={value}`.
  pub fn flag(self, name: &str, value: impl AsRef<OsStr>) -> Self {
    let mut flag = OsString::from(format!("--{}=", name));
    flag.push(value);
    self.arg(flag)
  }

  /// Split a single command string on whitespace.
  ///
  /// Arguments containing spaces cannot be expressed this way; build the
  /// argument list with [`CommandLine::arg`] instead. Returns `None` for a
  /// blank string.
  pub fn parse(line: &str) -> Option<Self> {
    let mut tokens = line.split_whitespace();
    let program = tokens.next()?;
    Some(Self::new(program).args(tokens))
  }

  /// True if any argument contains `needle`.
  pub fn mentions(&self, needle: &str) -> bool {
    self.args.iter().any(|a| a.to_string_lossy().contains(needle))
  }
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.to_string_lossy())?;
    for arg in &self.args {
      write!(f, " {}", arg.to_string_lossy())?;
    }
    Ok(())
  }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
  /// Exit code, `None` if the process was killed by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl RunOutcome {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Short human-readable description of a failed outcome.
  pub fn describe_failure(&self) -> String {
    match self.code {
      Some(code) => format!("exited with code {}", code),
      None => "terminated by signal".to_string(),
    }
  }
}

/// Launches external commands and waits for them.
///
/// Each call runs exactly one process to completion. There are no retries.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
  async fn run(&self, command: &CommandLine, cwd: &Path) -> Result<RunOutcome, RunError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  async fn run(&self, command: &CommandLine, cwd: &Path) -> Result<RunOutcome, RunError> {
    info!(command = %command, "running command");
    debug!(cwd = %cwd.display(), "spawning process");

    let output = Command::new(&command.program)
      .args(&command.args)
      .current_dir(cwd)
      .kill_on_drop(true)
      .output()
      .await
      .map_err(|source| RunError::Spawn {
        program: command.program.to_string_lossy().into_owned(),
        source,
      })?;

    let outcome = RunOutcome {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if outcome.success() {
      if !outcome.stdout.trim().is_empty() {
        debug!(stdout = %outcome.stdout.trim(), "command output");
      }
    } else {
      error!(
        command = %command,
        code = ?outcome.code,
        stderr = %outcome.stderr.trim(),
        "command failed"
      );
    }

    Ok(outcome)
  }
}

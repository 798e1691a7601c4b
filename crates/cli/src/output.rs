//! Status lines printed to stdout.
//!
//! Logs go to stderr through tracing; these lines are the user-facing
//! summary of what a run changed.

use std::fmt::Display;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

/// Leading mark of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
  /// Something was written, fetched, or removed.
  Changed,
  /// Nothing changed.
  Unchanged,
}

impl Mark {
  fn glyph(self) -> &'static str {
    match self {
      Mark::Changed => "+",
      Mark::Unchanged => "=",
    }
  }
}

pub fn status(mark: Mark, message: impl Display) {
  let raw = mark.glyph();
  let glyph = raw.if_supports_color(Stream::Stdout, |g| match mark {
    Mark::Changed => g.green().to_string(),
    Mark::Unchanged => g.cyan().to_string(),
  });
  println!("{} {}", glyph, message);
}

/// Join counts into a single line such as `2 templates, 4 bundles`.
pub fn tally(counts: &[(usize, &str)]) -> String {
  counts
    .iter()
    .map(|(count, noun)| format!("{} {}", count, noun))
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn format_elapsed(elapsed: Duration) -> String {
  match elapsed.as_millis() {
    ms @ 0..1_000 => format!("{}ms", ms),
    1_000..60_000 => format!("{:.1}s", elapsed.as_secs_f64()),
    _ => {
      let secs = elapsed.as_secs();
      format!("{}m{:02}s", secs / 60, secs % 60)
    }
  }
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// coverbuild - builds the ScriptCover browser extension
#[derive(Parser)]
#[command(name = "coverbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Clean the build directories
  #[arg(long)]
  clean: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  if cli.clean { cmd::cmd_clean() } else { cmd::cmd_build() }
}

mod address;
mod decode;
mod error;
mod fields;
mod immediate;
mod tables;
mod window;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sim8086")]
#[command(about = "Disassemble 8086 machine code into NASM syntax", long_about = None)]
struct Cli {
  /// Path to the object-code file
  input: PathBuf,

  /// Write the listing to a file instead of stdout
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Raise log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let data = fs::read(&cli.input)
    .with_context(|| format!("Error reading file `{}`", cli.input.display()))?;
  debug!(path = %cli.input.display(), bytes = data.len(), "read input");

  let listing = decode::disassemble(&data)
    .with_context(|| format!("Error disassembling `{}`", cli.input.display()))?;

  match &cli.output {
    Some(path) => fs::write(path, &listing)
      .with_context(|| format!("Error writing file `{}`", path.display()))?,
    None => io::stdout()
      .lock()
      .write_all(listing.as_bytes())
      .context("Error writing to stdout")?,
  }
  Ok(())
}

fn init_logging(verbose: u8) {
  let default = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

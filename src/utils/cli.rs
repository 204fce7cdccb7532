//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::utils::md5::{compute_md5_with_block_size, default_block_size, Md5Error};
use anyhow::Context;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Print the MD5 checksum of a file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to checksum.
    file: PathBuf,
    /// Number of bytes to read from the file at a time.
    #[arg(short, long, default_value_t = default_block_size())]
    block_size: NonZeroUsize,
    /// Print only the digest, without the file name.
    #[arg(short, long)]
    quiet: bool,
}

/// Logs go to stderr so that stdout only ever carries digests.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Process exit code for a failed digest.
#[must_use]
pub fn exit_code(err: &Md5Error) -> i32 {
    match *err {
        Md5Error::NotFound { .. } => 1,
        Md5Error::PermissionDenied { .. } => 2,
        Md5Error::IsADirectory { .. } => 3,
        Md5Error::Io { .. } => 4,
    }
}

/// Format one output line the way `md5sum(1)` does: digest, two spaces, path.
#[must_use]
pub fn format_line(digest: &str, file: &Path, quiet: bool) -> String {
    if quiet {
        digest.to_owned()
    } else {
        format!("{digest}  {}", file.display())
    }
}

/// Checksum the requested file and build the line to print.
fn execute(cli: &Cli) -> anyhow::Result<String> {
    let digest = compute_md5_with_block_size(&cli.file, cli.block_size)
        .with_context(|| format!("could not checksum `{}`", cli.file.display()))?;
    Ok(format_line(&digest, &cli.file, cli.quiet))
}

/// Main entrypoint to application
pub fn run() {
    init_tracing();
    tracing::debug!("Starting application");
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(line) => println!("{line}"),
        Err(err) => {
            tracing::error!("error: {err:#}");
            let code = err.downcast_ref::<Md5Error>().map_or(4, exit_code);
            std::process::exit(code);
        }
    }
}

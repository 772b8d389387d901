//! keytree CLI - stdin/stdout transport for the three resource operations.
//!
//! Each invocation reads one JSON request document from stdin, runs a
//! single operation, writes one JSON response document to stdout, and
//! exits. Diagnostics (including the non-fatal version-mismatch warning)
//! go to stderr so they never corrupt the response channel.
//!
//! The operation is selected either by subcommand (`keytree materialize
//! ./dir`) or by the name the executable was invoked under, so the binary
//! can be installed three times as `identify`, `materialize`, and
//! `acknowledge` symlinks.

use anyhow::Context;
use clap::Parser;
use keytree_core::models::Request;
use keytree_core::ops;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keytree")]
#[command(about = "Expose a key/value configuration map as a versioned file tree")]
struct Cli {
    #[command(subcommand)]
    command: Operation,
}

#[derive(clap::Subcommand)]
enum Operation {
    /// Report the content version of the source map
    Identify,
    /// Write the source map into a directory, reporting version and metadata
    Materialize {
        /// Directory to write configuration files into
        target_dir: Option<PathBuf>,
    },
    /// Confirm the content version of the source map without touching disk
    Acknowledge,
}

/// Resolves the operation from the name the program was invoked under.
///
/// Returns `None` when the name is not one of the three operations, in
/// which case the subcommand form applies.
fn operation_from_invocation() -> Option<Operation> {
    let mut args = std::env::args();
    let program = args.next()?;
    let name = Path::new(&program).file_stem()?.to_str()?.to_owned();

    match name.as_str() {
        "identify" => Some(Operation::Identify),
        "materialize" => Some(Operation::Materialize {
            target_dir: args.next().map(PathBuf::from),
        }),
        "acknowledge" => Some(Operation::Acknowledge),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    // stdout carries the response document; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let operation = match operation_from_invocation() {
        Some(operation) => operation,
        None => Cli::parse().command,
    };

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read input document")?;
    let request = Request::from_json(&input)?;

    let response = match operation {
        Operation::Identify => serde_json::to_string(&ops::identify(&request))?,
        Operation::Materialize { target_dir } => {
            serde_json::to_string(&ops::materialize(&request, target_dir.as_deref())?)?
        }
        Operation::Acknowledge => serde_json::to_string(&ops::acknowledge(&request))?,
    };

    println!("{}", response);
    Ok(())
}

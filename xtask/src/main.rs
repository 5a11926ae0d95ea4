//! Workspace tasks: `cargo xtask <command>`.
//!
//! - `options` prints the default page options, ready to paste into a
//!   `<script id="folio-options">` block.
//! - `dist` builds the wasm entry crate and runs `wasm-bindgen` on it.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use folio::options::Options;

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const ENTRY_CRATE: &str = "folio-web";

#[derive(Parser)]
#[command(name = "xtask", about = "folio workspace tasks")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Print the default options.
    Options {
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Build the browser bundle into `dist/`.
    Dist {
        /// Build without optimizations.
        #[arg(long)]
        debug: bool,
        /// Output directory, relative to the workspace root.
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::Options { format } => print_options(format),
        Task::Dist { debug, out_dir } => dist(debug, &out_dir),
    }
}

fn print_options(format: Format) -> Result<()> {
    let options = Options::default();
    let text = match format {
        Format::Toml => options.to_toml()?,
        Format::Json => serde_json::to_string_pretty(&options)?,
    };
    println!("{text}");
    Ok(())
}

fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn run(command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to spawn {command:?}"))?;
    if !status.success() {
        bail!("{command:?} exited with {status}");
    }
    Ok(())
}

fn dist(debug: bool, out_dir: &Path) -> Result<()> {
    let root = workspace_root()?;
    let profile = if debug { "debug" } else { "release" };

    let mut build = Command::new(env!("CARGO"));
    let _ = build
        .current_dir(&root)
        .args(["build", "--package", ENTRY_CRATE, "--target", WASM_TARGET]);
    if !debug {
        let _ = build.arg("--release");
    }
    run(&mut build)?;

    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join(format!("{}.wasm", ENTRY_CRATE.replace('-', "_")));
    run(Command::new("wasm-bindgen")
        .current_dir(&root)
        .arg("--target")
        .arg("web")
        .arg("--out-dir")
        .arg(root.join(out_dir))
        .arg(&wasm))
    .context(
        "is wasm-bindgen-cli installed? (cargo install wasm-bindgen-cli)",
    )?;

    println!("bundle written to {}", root.join(out_dir).display());
    Ok(())
}

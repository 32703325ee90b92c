use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use console::{style, Term};

use crate::args::Options;

/// The file the listing of `class` is written to.
pub fn output_path(opts: &Options, class: &str) -> PathBuf {
    match &opts.output {
        Some(path) => path.clone(),
        None => opts.path.with_file_name(format!("{class}.j")),
    }
}

pub fn write_listing(path: &Path, code: &str) -> anyhow::Result<()> {
    fs::write(path, code).with_context(|| format!("could not write `{}`", path.display()))
}

/// Print a short line about how far along we are.
pub fn status(verb: &str, what: impl AsRef<str>) -> anyhow::Result<()> {
    let line = format!("{:>10} {}", style(verb).green().bold(), what.as_ref());
    Term::stderr().write_line(&line)?;
    Ok(())
}

pub fn failure(what: impl AsRef<str>) -> anyhow::Result<()> {
    let line = format!("{:>10} {}", style("failed").red().bold(), what.as_ref());
    Term::stderr().write_line(&line)?;
    Ok(())
}

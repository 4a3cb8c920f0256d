use anyhow::{bail, Result};
use itertools::Itertools;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Convert an io::error to a string and strip "(os error 2)" from the end.
fn io_error_to_string(err: &std::io::Error) -> String {
    let s = err.to_string();
    s.strip_suffix(&format!(" (os error {})", err.raw_os_error().unwrap_or(0)))
        .unwrap_or(&s)
        .to_string()
}

/// Format an error and its causes, one per line.
pub fn format_error_chain(err: &anyhow::Error) -> String {
    if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
        let io_err_str = io_error_to_string(io_err);
        match err.chain().len() {
            1 => return format!("ERROR: {io_err_str}"),
            2 => return format!("ERROR: {io_err_str}: {err}"),
            _ => (),
        }
    }
    format!("ERROR: {}", err.chain().join("\n\tCaused by: "))
}

/// Print an error chain.
pub fn print_error_chain(err: &anyhow::Error) {
    eprintln!("{}", format_error_chain(err));
}

/// A path that must exist when it is given on the command line.
/// It is made absolute, so the engine can run from any directory.
#[derive(Clone)]
pub struct ExistingPath {
    path: PathBuf,
}

impl FromStr for ExistingPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<ExistingPath> {
        match Path::new(s).canonicalize() {
            Ok(path) => Ok(ExistingPath { path }),
            Err(e) => bail!("{s}: {}", io_error_to_string(&e)),
        }
    }
}

impl Debug for ExistingPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(&self.path, f)
    }
}

impl Deref for ExistingPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

/// Accept a thread count of at least one.
pub fn parse_threads(s: &str) -> Result<usize> {
    let Ok(threads) = s.parse::<usize>() else {
        bail!("Expecting a positive integer here.");
    };
    if threads == 0 {
        bail!("At least one thread is required.");
    }
    Ok(threads)
}

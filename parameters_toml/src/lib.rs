// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]

//! Site parameters of a BRAVE installation.
//!
//! `parameters.toml` is read from the directory of the running executable.
//! Every key is optional; missing keys and a missing file fall back to the
//! compiled-in defaults.

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::OnceLock;

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
struct Parameters {
    /// Workflow engine executable, looked up on PATH unless it contains a /.
    engine: Cow<'static, str>,
    /// Snakefile of the pipeline. Relative paths are resolved against the
    /// directory of the running executable.
    snakefile: Cow<'static, str>,
    /// Let the engine create a conda environment per rule.
    use_conda: bool,
    /// Memory in GB given to the engine when the host cannot be probed.
    default_mem_gb: usize,
    /// Interpreter for the DESeq2 script.
    deseq2_runner: Cow<'static, str>,
    /// Name of the engine config file written into the work directory.
    config_file_name: Cow<'static, str>,
}

const DEFAULT_PARAMETERS: Parameters = Parameters {
    engine: Cow::Borrowed("snakemake"),
    snakefile: Cow::Borrowed("../workflow/Snakefile"),
    use_conda: true,
    default_mem_gb: 4,
    deseq2_runner: Cow::Borrowed("Rscript"),
    config_file_name: Cow::Borrowed("brave_config.json"),
};

impl Default for Parameters {
    fn default() -> Self {
        DEFAULT_PARAMETERS
    }
}

static PARAMETERS: OnceLock<Result<Parameters>> = OnceLock::new();

/// Return a reference to the global parameters.
/// The parameters may need to be loaded; if loading fails, return Err.
fn parameters() -> &'static Result<Parameters> {
    PARAMETERS.get_or_init(|| {
        let path = std::env::current_exe()
            .context("Unable to locate the running executable")?
            .with_file_name("parameters.toml");
        if !path.exists() {
            warn!(
                "could not find parameters.toml at {}, falling back to defaults",
                path.display()
            );
            Ok(DEFAULT_PARAMETERS)
        } else {
            let s = std::fs::read_to_string(&path).with_context(|| path.display().to_string())?;
            Ok(toml::from_str(&s).with_context(|| path.display().to_string())?)
        }
    })
}

macro_rules! parameter_getter {
    ($a:ident, $t:ty) => {
        pub fn $a() -> Result<&'static $t> {
            let val = match parameters() {
                Err(e) => return Err(anyhow::anyhow!(e)),
                Ok(p) => &p.$a,
            };
            if DEFAULT_PARAMETERS.$a != *val {
                warn!("using non-default {} = {:?}", stringify!($a), val);
            }
            Ok(val)
        }
    };
}

parameter_getter!(engine, str);
parameter_getter!(snakefile, str);
parameter_getter!(use_conda, bool);
parameter_getter!(default_mem_gb, usize);
parameter_getter!(deseq2_runner, str);
parameter_getter!(config_file_name, str);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() -> Result<()> {
        assert_eq!(engine()?, "snakemake");
        assert_eq!(*default_mem_gb()?, 4);
        assert_eq!(config_file_name()?, "brave_config.json");
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let p: Parameters = toml::from_str("engine = \"/opt/snakemake/bin/snakemake\"\nuse_conda = false\n")?;
        assert_eq!(p.engine, "/opt/snakemake/bin/snakemake");
        assert!(!p.use_conda);
        assert_eq!(p.deseq2_runner, DEFAULT_PARAMETERS.deseq2_runner);
        assert!(toml::from_str::<Parameters>("cores = 8\n").is_err());
        assert!(toml::from_str::<Parameters>("default_cores = 8\n").is_err());
        Ok(())
    }
}

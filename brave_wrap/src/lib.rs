// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]

pub mod config;
pub mod engine_args;
pub mod logging;
pub mod resources;
pub mod targets;
pub mod utils;

use anyhow::{Context, Result};
use engine_args::EngineArgs;
use itertools::Itertools;
use shell_escape::escape;
use std::process::{Command, ExitCode, ExitStatus};

/// Convert something to an ExitCode.
pub trait IntoExitCode {
    fn into_exit_code(self) -> ExitCode;
}

impl IntoExitCode for ExitStatus {
    /// Convert an ExitStatus to an ExitCode.
    fn into_exit_code(self) -> ExitCode {
        self.code()
            .map_or(ExitCode::FAILURE, |x| ExitCode::from(x as u8))
    }
}

/// The engine invocation as a shell command line, for logging.
fn command_line(engine: &str, args: &[String]) -> String {
    std::iter::once(engine)
        .chain(args.iter().map(String::as_str))
        .map(|x| escape(x.into()))
        .join(" ")
}

/// Run the workflow engine to completion and return its exit status.
/// Output of the engine goes straight to this process's stdout and stderr.
pub fn execute_to_status(engine: &str, engine_args: &EngineArgs) -> Result<ExitStatus> {
    let args = engine_args.get_args();
    let cmdline = command_line(engine, &args);
    log::info!("running {cmdline}");
    Command::new(engine)
        .args(&args)
        .status()
        .with_context(|| format!("running {cmdline}"))
}

/// Run the workflow engine and return its exit status as an ExitCode.
pub fn execute(engine: &str, engine_args: &EngineArgs) -> Result<ExitCode> {
    Ok(execute_to_status(engine, engine_args)?.into_exit_code())
}

// Wrap the output of --help to 80 columns when the terminal size is unknown.
// The default value of clap is 100.
pub fn set_env_columns() {
    if terminal_size::terminal_size().is_none() && std::env::var_os("COLUMNS").is_none() {
        std::env::set_var("COLUMNS", "80");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_line_is_shell_escaped() {
        let args = vec![
            "--directory=/data/my run".to_string(),
            "--cores=4".to_string(),
        ];
        assert_eq!(
            command_line("snakemake", &args),
            "snakemake '--directory=/data/my run' --cores=4"
        );
    }

    #[test]
    fn test_engine_exit_status_is_forwarded() -> Result<()> {
        let engine_args = EngineArgs {
            snakefile: PathBuf::from("Snakefile"),
            work_dir: PathBuf::from("."),
            config_file: PathBuf::from("brave_config.json"),
            cores: 1,
            mem_gb: 1,
            use_conda: false,
            dry_run: true,
            quiet: false,
            dag: false,
        };
        assert!(execute_to_status("true", &engine_args)?.success());
        assert_eq!(execute_to_status("false", &engine_args)?.code(), Some(1));
        assert!(execute_to_status("/nonexistent/snakemake", &engine_args).is_err());
        Ok(())
    }
}

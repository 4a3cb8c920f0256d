//! Invocation of the R DESeq2 script.

use crate::errors::DiffExpError;
use std::fs;
use std::path::Path;
use std::process::Command;

/// DESeq2 script run by [`Deseq2Runner`]. It takes the counts CSV, the
/// metadata CSV, the output CSV and the number of CPUs as arguments.
pub const DESEQ2_SCRIPT: &str = include_str!("deseq2.R");

const SCRIPT_NAME: &str = "deseq2.R";

#[derive(Debug, Clone)]
pub struct Deseq2Runner {
    /// Interpreter of the script, usually `Rscript`.
    pub program: String,
    pub cpus: usize,
}

impl Deseq2Runner {
    /// The command that runs the script stored in `script_dir`.
    pub fn command(
        &self,
        script_dir: &Path,
        counts_csv: &Path,
        metadata_csv: &Path,
        out_file: &Path,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(script_dir.join(SCRIPT_NAME))
            .arg(counts_csv)
            .arg(metadata_csv)
            .arg(out_file)
            .arg(self.cpus.to_string());
        cmd
    }

    /// Write the script into `script_dir` and run it to completion.
    pub fn run(
        &self,
        script_dir: &Path,
        counts_csv: &Path,
        metadata_csv: &Path,
        out_file: &Path,
    ) -> Result<(), DiffExpError> {
        let spawn_err = |source: std::io::Error| DiffExpError::Spawn {
            runner: self.program.clone(),
            source,
        };
        let script = script_dir.join(SCRIPT_NAME);
        fs::write(&script, DESEQ2_SCRIPT)
            .map_err(|source| DiffExpError::WriteScript { path: script, source })?;

        let mut cmd = self.command(script_dir, counts_csv, metadata_csv, out_file);
        log::info!("running {cmd:?}");
        let status = cmd.status().map_err(spawn_err)?;
        if !status.success() {
            return Err(DiffExpError::RunnerFailed {
                runner: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

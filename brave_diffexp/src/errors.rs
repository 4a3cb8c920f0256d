use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum DiffExpError {
    #[error("Counts file {path:?} not found. Check if it exists.")]
    MissingCounts { path: PathBuf },

    #[error("Error reading the counts file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Error writing {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Error writing {path:?}")]
    WriteScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The counts file {path:?} has no 'Geneid' column.")]
    NoGeneid { path: PathBuf },

    #[error("The counts file {path:?} has no sample columns.")]
    NoSamples { path: PathBuf },

    #[error("On line {line} of {path:?} in '{column}' column: '{value}' is not a read count.")]
    BadCount {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error(
        "The counts file has {found} samples, but {num_control} control and \
         {num_condition} condition samples were given."
    )]
    SampleCountMismatch {
        found: usize,
        num_control: usize,
        num_condition: usize,
    },

    #[error("Failed to run {runner}")]
    Spawn {
        runner: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{runner} exited with {status}")]
    RunnerFailed { runner: String, status: ExitStatus },
}

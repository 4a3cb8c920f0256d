//! brave-deseq2
#![deny(missing_docs)]

use anyhow::Result;
use brave_diffexp::{Deseq2Runner, DiffExpJob};
use brave_wrap::{logging, set_env_columns};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Differential gene expression of condition against control samples with DESeq2
#[derive(Parser, Debug)]
#[clap(name = "brave-deseq2", version)]
struct Deseq2 {
    /// Counts matrix from featureCounts.
    #[clap(long, value_name = "FILE")]
    counts_file: PathBuf,

    /// Number of control samples. They are the first sample columns of the matrix.
    #[clap(long, value_name = "INT")]
    num_control: usize,

    /// Number of condition samples.
    #[clap(long, value_name = "INT")]
    num_condition: usize,

    /// Output CSV with the differential expression results.
    #[clap(long, value_name = "FILE")]
    out_file: PathBuf,

    /// Number of CPUs to run DESeq2 with.
    #[clap(long, value_name = "INT", default_value_t = 4, value_parser = brave_wrap::utils::parse_threads)]
    cpus: usize,

    /// Interpreter of the DESeq2 R script. Defaults to the one in parameters.toml.
    #[clap(long, value_name = "PATH")]
    runner: Option<String>,
}

fn inner_main() -> Result<()> {
    set_env_columns();
    let opts = Deseq2::parse();
    logging::init(false);

    let program = match opts.runner {
        Some(runner) => runner,
        None => parameters_toml::deseq2_runner()?.to_string(),
    };
    DiffExpJob {
        counts_file: opts.counts_file,
        num_control: opts.num_control,
        num_condition: opts.num_condition,
        out_file: opts.out_file,
        runner: Deseq2Runner {
            program,
            cpus: opts.cpus,
        },
    }
    .run()
}

fn main() -> ExitCode {
    match inner_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            brave_wrap::utils::print_error_chain(&err);
            ExitCode::FAILURE
        }
    }
}

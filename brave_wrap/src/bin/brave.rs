//! brave
#![deny(missing_docs)]

use anyhow::Result;
use brave_wrap::config::{AnalysisArgs, PipelineConfig, SampleArgs};
use brave_wrap::engine_args::{EngineArgs, EngineOpts};
use brave_wrap::resources::HostResources;
use brave_wrap::targets::TargetsArgs;
use brave_wrap::{execute, logging, set_env_columns};
use clap::Parser;
use std::process::ExitCode;

const CMD: &str = "brave";

/// Bulk RNA-seq Analysis & Visualization Engine
#[derive(Parser, Debug)]
#[clap(name = CMD, version)]
struct Brave {
    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Parser, Debug)]
enum SubCommand {
    /// Run the bulk RNA-seq analysis pipeline on the samples of a sample sheet.
    #[clap(name = "analysis")]
    Analysis(Analysis),

    /// Print the terminal files of one pipeline stage, one per line.
    #[clap(name = "targets")]
    Targets(TargetsArgs),

    /// Validate a sample sheet and its FASTQ files without running the pipeline.
    #[clap(name = "check")]
    Check(SampleArgs),
}

#[derive(Parser, Debug)]
struct Analysis {
    #[clap(flatten)]
    args: AnalysisArgs,

    #[clap(flatten)]
    engine: EngineOpts,
}

fn inner_main() -> Result<ExitCode> {
    set_env_columns();
    let opts = Brave::parse();

    match opts.subcmd {
        SubCommand::Analysis(a) => {
            logging::init(a.args.quiet);
            let host = HostResources::probe()?;
            log::info!("host has {} cores and {} GB available memory", host.cores, host.mem_gb);

            let config = PipelineConfig::assemble(&a.args, host)?;
            let config_file = config.write(parameters_toml::config_file_name()?)?;
            let use_conda = *parameters_toml::use_conda()? && !a.engine.no_conda;
            let engine_args =
                EngineArgs::new(&config, config_file, a.engine.resolve_snakefile()?, use_conda);
            execute(parameters_toml::engine()?, &engine_args)
        }
        SubCommand::Targets(t) => {
            logging::init(true);
            for file in t.terminal_files()? {
                println!("{}", file.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        SubCommand::Check(c) => {
            logging::init(false);
            let groups = c.load_groups()?;
            println!("{}", serde_json::to_string_pretty(&groups)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    match inner_main() {
        Ok(exit_code) => exit_code,
        Err(err) => {
            brave_wrap::utils::print_error_chain(&err);
            ExitCode::FAILURE
        }
    }
}

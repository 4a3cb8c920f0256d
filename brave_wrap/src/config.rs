//! Assembly of the configuration handed to the workflow engine.

use crate::resources::HostResources;
use crate::utils::parse_threads;
use anyhow::{ensure, Context, Result};
use brave_stages::{analysis_targets, Stage, TerminalFiles};
use brave_types::{
    check_fastq_files, LibraryLayout, MissingPathError, SampleGroups, SampleSheet,
    UnknownSampleTypePolicy, SAMPLE_SHEET_SCHEMA_VERSION,
};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Sample inputs shared by `brave analysis` and `brave check`.
#[derive(Parser, Debug, Clone)]
pub struct SampleArgs {
    /// Directory holding the FASTQ files named in the sample sheet.
    #[clap(short, long, value_name = "PATH")]
    pub input_dir: PathBuf,

    /// Sample sheet CSV with the columns sampleID,sampleType,fastq1,fastq2
    /// (or sampleID,sampleType,fastq with --unpaired).
    #[clap(short, long, value_name = "CSV")]
    pub sample_sheet: PathBuf,

    /// The reads are single-end.
    #[clap(long)]
    pub unpaired: bool,

    /// Leave out samples whose sampleType is neither control nor condition,
    /// instead of failing.
    #[clap(long)]
    pub skip_unknown_sample_types: bool,
}

impl SampleArgs {
    pub fn layout(&self) -> LibraryLayout {
        LibraryLayout::from_unpaired_flag(self.unpaired)
    }

    pub fn unknown_sample_type_policy(&self) -> UnknownSampleTypePolicy {
        if self.skip_unknown_sample_types {
            UnknownSampleTypePolicy::Skip
        } else {
            UnknownSampleTypePolicy::Reject
        }
    }

    /// Validate the input directory, the sample sheet and the FASTQ files,
    /// and group the samples.
    pub fn load_groups(&self) -> Result<SampleGroups> {
        if !self.input_dir.is_dir() {
            return Err(MissingPathError::MissingPath {
                what: "input directory",
                path: self.input_dir.clone(),
            }
            .into());
        }
        let sheet = SampleSheet::read(&self.sample_sheet, self.layout())?;
        let groups = sheet.group(self.unknown_sample_type_policy())?;
        for row in &groups.skipped {
            warn!(
                "skipping sample '{}' on line {} of the sample sheet: unknown sampleType '{}'",
                row.sample_id, row.line, row.sample_type
            );
        }
        check_fastq_files(&self.input_dir, &groups)?;
        info!(
            "{} control and {} condition samples",
            groups.control.len(),
            groups.condition.len()
        );
        Ok(groups)
    }
}

/// Arguments of `brave analysis` that shape the pipeline configuration.
#[derive(Parser, Debug, Clone)]
pub struct AnalysisArgs {
    #[clap(flatten)]
    pub samples: SampleArgs,

    /// Root directory of the pipeline outputs. Defaults to the work directory.
    #[clap(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Working directory of the engine. Defaults to the input directory.
    #[clap(short, long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Number of cores the engine may use. Defaults to all cores of the host.
    #[clap(short = '@', long, value_name = "NUM", value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Show what the engine would run without running it.
    #[clap(long)]
    pub dry_run: bool,

    /// Only print warnings and errors.
    #[clap(long)]
    pub quiet: bool,

    /// Print the job graph in D3.js JSON format instead of running it.
    #[clap(long)]
    pub dag: bool,
}

/// Everything the Snakefile reads from its `pipeline` config section.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub pipeline_input: PathBuf,
    pub pipeline_output: Option<PathBuf>,
    pub work_dir: PathBuf,
    pub sample_type: LibraryLayout,
    pub sample_sheet: PathBuf,
    /// Hex SHA-256 of the sample sheet contents.
    pub sample_sheet_sha256: String,
    pub sample_sheet_schema: u32,
    pub samples_control: Vec<String>,
    pub samples_condition: Vec<String>,
    pub control_fastq: Vec<String>,
    pub condition_fastq: Vec<String>,
    pub threads: usize,
    pub mem_gb: usize,
    pub dry_run: bool,
    pub quiet: bool,
    pub dag: bool,
    pub targets: BTreeMap<Stage, TerminalFiles>,
}

#[derive(Serialize)]
struct EngineConfig<'a> {
    pipeline: &'a PipelineConfig,
}

impl PipelineConfig {
    /// Validate the arguments against the filesystem and merge them with the
    /// host resources. Nothing is written.
    pub fn assemble(args: &AnalysisArgs, host: HostResources) -> Result<PipelineConfig> {
        let input_dir = &args.samples.input_dir;
        let groups = args.samples.load_groups()?;

        let work_dir = match &args.work_dir {
            Some(work_dir) if work_dir.is_dir() => work_dir.clone(),
            Some(work_dir) => {
                warn!(
                    "work directory {} does not exist, using the input directory {}",
                    work_dir.display(),
                    input_dir.display()
                );
                input_dir.clone()
            }
            None => input_dir.clone(),
        };

        let threads = args.threads.unwrap_or(host.cores);
        ensure!(threads >= 1, "At least one thread is required.");

        let sheet_bytes = fs::read(&args.samples.sample_sheet)
            .with_context(|| args.samples.sample_sheet.display().to_string())?;
        let sample_sheet_sha256 = hex::encode(Sha256::digest(&sheet_bytes));

        let layout = args.samples.layout();
        let output_root = args.output_dir.as_deref().unwrap_or(&work_dir);
        let targets = analysis_targets(output_root, &groups, layout);

        Ok(PipelineConfig {
            pipeline_input: input_dir.clone(),
            pipeline_output: args.output_dir.clone(),
            sample_type: layout,
            sample_sheet: args.samples.sample_sheet.clone(),
            sample_sheet_sha256,
            sample_sheet_schema: SAMPLE_SHEET_SCHEMA_VERSION,
            samples_control: groups.control,
            samples_condition: groups.condition,
            control_fastq: groups.control_fastq,
            condition_fastq: groups.condition_fastq,
            threads,
            mem_gb: host.mem_gb,
            dry_run: args.dry_run,
            quiet: args.quiet,
            dag: args.dag,
            targets,
            work_dir,
        })
    }

    /// The config as the JSON document read by the engine.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&EngineConfig { pipeline: self })
            .context("error serializing the pipeline config to json")
    }

    /// Write the config into the work directory and return its path.
    pub fn write(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.work_dir.join(file_name);
        fs::write(&path, self.to_json()?).with_context(|| path.display().to_string())?;
        info!("wrote pipeline config to {}", path.display());
        Ok(path)
    }
}

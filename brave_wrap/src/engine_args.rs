use crate::config::PipelineConfig;
use crate::utils::ExistingPath;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Options of the workflow engine that do not end up in the pipeline config.
#[derive(Parser, Debug, Clone)]
pub struct EngineOpts {
    /// Snakefile to run instead of the one configured in parameters.toml.
    #[clap(long, value_name = "PATH")]
    pub snakefile: Option<ExistingPath>,

    /// Do not create conda environments for the pipeline rules.
    #[clap(long)]
    pub no_conda: bool,
}

impl EngineOpts {
    /// The Snakefile given on the command line, or else the one from
    /// parameters.toml resolved against the directory of the executable.
    pub fn resolve_snakefile(&self) -> Result<PathBuf> {
        if let Some(snakefile) = &self.snakefile {
            return Ok(snakefile.to_path_buf());
        }
        let configured = Path::new(parameters_toml::snakefile()?);
        if configured.is_absolute() {
            return Ok(configured.to_path_buf());
        }
        let exe = std::env::current_exe().context("Unable to locate the running executable")?;
        Ok(exe.with_file_name(configured))
    }
}

/// Command line of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineArgs {
    pub snakefile: PathBuf,
    pub work_dir: PathBuf,
    pub config_file: PathBuf,
    pub cores: usize,
    pub mem_gb: usize,
    pub use_conda: bool,
    pub dry_run: bool,
    pub quiet: bool,
    pub dag: bool,
}

impl EngineArgs {
    pub fn new(
        config: &PipelineConfig,
        config_file: PathBuf,
        snakefile: PathBuf,
        use_conda: bool,
    ) -> EngineArgs {
        EngineArgs {
            snakefile,
            work_dir: config.work_dir.clone(),
            config_file,
            cores: config.threads,
            mem_gb: config.mem_gb,
            use_conda,
            dry_run: config.dry_run,
            quiet: config.quiet,
            dag: config.dag,
        }
    }

    /// Convert this struct into a vector of command line arguments.
    pub(crate) fn get_args(&self) -> Vec<String> {
        [
            Some(format!("--snakefile={}", self.snakefile.display())),
            Some(format!("--directory={}", self.work_dir.display())),
            Some(format!("--cores={}", self.cores)),
            Some(format!("--resources=mem_gb={}", self.mem_gb)),
            Some(format!("--configfile={}", self.config_file.display())),
            Some("--printshellcmds".to_string()),
            Some("--reason".to_string()),
            Some("--rerun-incomplete".to_string()),
            self.use_conda.then_some("--use-conda".to_string()),
            self.dry_run.then_some("--dry-run".to_string()),
            self.quiet.then_some("--quiet".to_string()),
            self.dag.then_some("--d3dag".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

use anyhow::{bail, Result};
use brave_stages::stage::read_accession_list;
use brave_stages::{
    aggregate, alignment, counts, diffexp, fastqc, metrics, qc, stage, trimming, Stage,
    TerminalFiles,
};
use brave_types::LibraryLayout;
use clap::Parser;
use std::path::PathBuf;

/// Arguments of `brave targets`.
#[derive(Parser, Debug, Clone)]
pub struct TargetsArgs {
    /// Pipeline stage: stage, fastqc, qc, trimming, alignment, counts,
    /// metrics, diffexp or aggregate.
    #[clap(long, value_name = "NAME")]
    pub stage: Stage,

    /// Output directory of the stage.
    #[clap(long, value_name = "PATH")]
    pub out_dir: PathBuf,

    /// Comma-separated sample names, control samples first.
    #[clap(long, value_name = "LIST", value_delimiter = ',')]
    pub samples: Vec<String>,

    /// The reads are single-end.
    #[clap(long)]
    pub unpaired: bool,

    /// Directory of the STAR alignments, for the metrics stage.
    #[clap(long, value_name = "PATH")]
    pub align_dir: Option<PathBuf>,

    /// SRA accession list, one accession per line, for the stage stage.
    #[clap(long, value_name = "PATH")]
    pub sra_list: Option<PathBuf>,

    /// Comma-separated FASTQ paths, for the fastqc stage.
    #[clap(long, value_name = "LIST", value_delimiter = ',', conflicts_with = "input_dir")]
    pub fastqs: Vec<PathBuf>,

    /// Directory whose FASTQ files are listed, for the fastqc stage.
    #[clap(long, value_name = "PATH")]
    pub input_dir: Option<PathBuf>,

    /// Extension of the FASTQ files, for the fastqc stage.
    #[clap(long, value_name = "EXT", default_value = fastqc::DEFAULT_FASTQ_EXT)]
    pub fastq_ext: String,

    /// Extension of the downloaded FASTQ files, for the stage stage.
    #[clap(long, value_name = "EXT", default_value = stage::DEFAULT_EXT)]
    pub ext: String,
}

impl TargetsArgs {
    pub fn terminal_files(&self) -> Result<TerminalFiles> {
        let layout = LibraryLayout::from_unpaired_flag(self.unpaired);
        let out = self.out_dir.as_path();
        Ok(match self.stage {
            Stage::Download => {
                let Some(sra_list) = &self.sra_list else {
                    bail!("--sra-list is required for the {} stage", self.stage);
                };
                stage::terminal_files(out, &read_accession_list(sra_list)?, layout, &self.ext)
            }
            Stage::Fastqc => match &self.input_dir {
                Some(in_dir) => {
                    let fastqs: Vec<_> = fastqc::fastq_groups(in_dir, layout, &self.fastq_ext)?
                        .into_values()
                        .flatten()
                        .collect();
                    fastqc::terminal_files(out, &fastqs, &self.fastq_ext)?
                }
                None => fastqc::terminal_files(out, &self.fastqs, &self.fastq_ext)?,
            },
            Stage::Qc => qc::terminal_files(out, &self.samples, layout),
            Stage::Trimming => trimming::terminal_files(out, &self.samples, layout),
            Stage::Alignment => alignment::terminal_files(out, &self.samples),
            Stage::Counts => counts::terminal_files(out),
            Stage::Metrics => {
                let Some(align_dir) = &self.align_dir else {
                    bail!("--align-dir is required for the {} stage", self.stage);
                };
                metrics::terminal_files(align_dir, out, &self.samples)
            }
            Stage::Diffexp => diffexp::terminal_files(out),
            Stage::Aggregate => aggregate::terminal_files(out),
        })
    }
}

// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]

//! Differential expression of condition against control samples with DESeq2.

pub mod errors;
pub mod matrix;
pub mod runner;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use errors::DiffExpError;
pub use matrix::{design, write_metadata_csv, Condition, CountMatrix};
pub use runner::{Deseq2Runner, DESEQ2_SCRIPT};

pub const COUNTS_CSV: &str = "counts.csv";
pub const METADATA_CSV: &str = "metadata.csv";

/// One differential expression run over a featureCounts table.
#[derive(Debug, Clone)]
pub struct DiffExpJob {
    pub counts_file: PathBuf,
    /// The first `num_control` samples of the table are controls.
    pub num_control: usize,
    pub num_condition: usize,
    pub out_file: PathBuf,
    pub runner: Deseq2Runner,
}

impl DiffExpJob {
    /// Load and filter the counts, then write the DESeq2 inputs into `dir`.
    /// Returns the paths of the counts and metadata files.
    pub fn prepare_inputs(&self, dir: &Path) -> Result<(PathBuf, PathBuf), DiffExpError> {
        let mut matrix = CountMatrix::read_featurecounts(&self.counts_file)?;
        let dropped = matrix.drop_unexpressed();
        log::info!(
            "{} genes with reads in {} samples, {dropped} genes without reads dropped",
            matrix.genes().len(),
            matrix.samples().len()
        );
        let conditions = design(matrix.samples(), self.num_control, self.num_condition)?;

        let counts_csv = dir.join(COUNTS_CSV);
        matrix.write_transposed_csv(&counts_csv)?;
        let metadata_csv = dir.join(METADATA_CSV);
        write_metadata_csv(&metadata_csv, &conditions)?;
        Ok((counts_csv, metadata_csv))
    }

    /// Run DESeq2 and write the results table to `out_file`.
    pub fn run(&self) -> Result<()> {
        let dir = tempfile::tempdir().context("creating a temporary directory for DESeq2 inputs")?;
        let (counts_csv, metadata_csv) = self.prepare_inputs(dir.path())?;
        self.runner
            .run(dir.path(), &counts_csv, &metadata_csv, &self.out_file)
            .with_context(|| format!("running DESeq2 on {}", self.counts_file.display()))?;
        log::info!("wrote {}", self.out_file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn job(counts_file: PathBuf, num_control: usize, num_condition: usize) -> DiffExpJob {
        DiffExpJob {
            counts_file,
            num_control,
            num_condition,
            out_file: PathBuf::from("Differential_geneexp_analysis.csv"),
            runner: Deseq2Runner {
                program: "Rscript".to_string(),
                cpus: 4,
            },
        }
    }

    #[test]
    fn test_prepare_inputs() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let counts = dir.path().join("counts.out");
        fs::write(
            &counts,
            "Geneid\tLength\tUHR_Rep1\tUHR_Rep2\tHBR_Rep1\ng1\t10\t0\t0\t0\ng2\t10\t4\t5\t6\n",
        )?;

        let (counts_csv, metadata_csv) = job(counts.clone(), 2, 1).prepare_inputs(dir.path())?;
        assert_eq!(
            fs::read_to_string(counts_csv)?,
            "Sample,g2\nUHR_Rep1,4\nUHR_Rep2,5\nHBR_Rep1,6\n"
        );
        assert_eq!(
            fs::read_to_string(metadata_csv)?,
            "Sample,Condition\nUHR_Rep1,Control\nUHR_Rep2,Control\nHBR_Rep1,Knockout\n"
        );

        assert!(matches!(
            job(counts, 1, 1).prepare_inputs(dir.path()),
            Err(DiffExpError::SampleCountMismatch { found: 3, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_counts_file_is_named() {
        let err = job(PathBuf::from("/nonexistent/counts.out"), 1, 1)
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/counts.out"));
    }
}

use crate::sample_sheet::SkippedRow;
use crate::{LibraryLayout, SampleType};
use itertools::Itertools;
use std::path::PathBuf;

/// A path named on the command line or in the sample sheet is absent.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MissingPathError {
    #[error("The {what} {path:?} does not exist.")]
    MissingPath { what: &'static str, path: PathBuf },

    #[error(
        "{} fastq file(s) listed in the sample sheet were not found in {in_dir:?}:\n{}",
        .missing.len(),
        .missing.iter().map(|name| format!("- {name}")).join("\n")
    )]
    MissingFastqs {
        in_dir: PathBuf,
        missing: Vec<String>,
    },
}

/// The sample sheet does not follow the schema of the declared library layout.
#[derive(Debug, thiserror::Error)]
pub enum SampleSheetError {
    #[error(transparent)]
    Missing(#[from] MissingPathError),

    #[error("The sample sheet {path:?} must be a comma-separated file with a .csv extension.")]
    NotCsv { path: PathBuf },

    #[error("Error reading the sample sheet {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("The sample sheet {path:?} does not list any samples.")]
    Empty { path: PathBuf },

    #[error(
        "The sample sheet {path:?} uses the {found} columns [{}], but this is a {declared} run. {}",
        .found.sheet_columns().join(", "),
        layout_hint(.declared)
    )]
    LayoutMismatch {
        path: PathBuf,
        found: LibraryLayout,
        declared: LibraryLayout,
    },

    #[error(
        "The sample sheet {path:?} has the columns [{}], but a {layout} run requires exactly [{}].",
        .found.join(", "),
        .layout.sheet_columns().join(", ")
    )]
    HeaderMismatch {
        path: PathBuf,
        found: Vec<String>,
        layout: LibraryLayout,
    },

    #[error(
        "Error in the sample sheet {path:?}. On line {line} in '{column}' column: \
         Value required but cell is empty."
    )]
    EmptyCell {
        path: PathBuf,
        line: usize,
        column: String,
    },

    #[error(
        "The sampleType column must be 'control' or 'condition'. Unrecognized values:\n{}",
        .rows.iter().map(|row| format!("- line {}: '{}' for sample '{}'", row.line, row.sample_type, row.sample_id)).join("\n")
    )]
    UnknownSampleTypes { rows: Vec<SkippedRow> },

    #[error(
        "The sampleID '{sample_id}' on line {line} was already used on line {first_line}. \
         Every sample needs a unique sampleID."
    )]
    DuplicateSampleId {
        sample_id: String,
        line: usize,
        first_line: usize,
    },

    #[error(
        "The sample sheet does not list any {group} samples. \
         Differential expression needs at least one control and one condition sample."
    )]
    EmptyGroup { group: SampleType },
}

fn layout_hint(declared: &LibraryLayout) -> &'static str {
    match declared {
        LibraryLayout::PairedEnd => {
            "Pass --unpaired for single-end data, or list both reads in fastq1 and fastq2."
        }
        LibraryLayout::SingleEnd => {
            "Drop --unpaired for paired-end data, or list one read per sample in a fastq column."
        }
    }
}

// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]

pub mod csv_parser;
pub mod errors;
pub mod fastq_check;
pub mod sample_sheet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub use errors::{MissingPathError, SampleSheetError};
pub use fastq_check::check_fastq_files;
pub use sample_sheet::{
    SampleGroups, SampleSheet, SampleSheetRow, SkippedRow, UnknownSampleTypePolicy,
    SAMPLE_SHEET_SCHEMA_VERSION,
};

/// Sequencing library layout of a run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum LibraryLayout {
    #[serde(rename = "paired_end")]
    #[strum(serialize = "paired_end")]
    PairedEnd,
    #[serde(rename = "single_end")]
    #[strum(serialize = "single_end")]
    SingleEnd,
}

impl LibraryLayout {
    /// Layout selected by the `--unpaired` command line flag.
    pub fn from_unpaired_flag(unpaired: bool) -> Self {
        if unpaired {
            LibraryLayout::SingleEnd
        } else {
            LibraryLayout::PairedEnd
        }
    }

    /// Number of FASTQ files contributed by each sample.
    pub fn reads_per_sample(self) -> usize {
        self.fastq_columns().len()
    }

    /// Sample sheet columns holding FASTQ file names, in read order.
    pub fn fastq_columns(self) -> &'static [&'static str] {
        match self {
            LibraryLayout::PairedEnd => &["fastq1", "fastq2"],
            LibraryLayout::SingleEnd => &["fastq"],
        }
    }

    /// The complete sample sheet header expected for this layout.
    pub fn sheet_columns(self) -> Vec<&'static str> {
        let mut cols = vec![sample_sheet::SAMPLE_ID_COL, sample_sheet::SAMPLE_TYPE_COL];
        cols.extend(self.fastq_columns());
        cols
    }

    /// The layout with the other schema.
    pub fn other(self) -> Self {
        match self {
            LibraryLayout::PairedEnd => LibraryLayout::SingleEnd,
            LibraryLayout::SingleEnd => LibraryLayout::PairedEnd,
        }
    }
}

/// Experimental group a sample belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum SampleType {
    #[serde(rename = "control")]
    #[strum(serialize = "control")]
    Control,
    #[serde(rename = "condition")]
    #[strum(serialize = "condition")]
    Condition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_layout_names() {
        assert_eq!(LibraryLayout::PairedEnd.to_string(), "paired_end");
        assert_eq!(
            LibraryLayout::from_str("single_end").unwrap(),
            LibraryLayout::SingleEnd
        );
        assert_eq!(
            LibraryLayout::from_unpaired_flag(false),
            LibraryLayout::PairedEnd
        );
        assert_eq!(
            LibraryLayout::from_unpaired_flag(true),
            LibraryLayout::SingleEnd
        );
    }

    #[test]
    fn test_layout_columns() {
        assert_eq!(
            LibraryLayout::PairedEnd.sheet_columns(),
            ["sampleID", "sampleType", "fastq1", "fastq2"]
        );
        assert_eq!(
            LibraryLayout::SingleEnd.sheet_columns(),
            ["sampleID", "sampleType", "fastq"]
        );
        for layout in LibraryLayout::iter() {
            assert_eq!(layout.other().other(), layout);
            assert_eq!(layout.reads_per_sample(), layout.fastq_columns().len());
        }
    }

    #[test]
    fn test_sample_type_is_case_sensitive() {
        assert_eq!(SampleType::from_str("control").unwrap(), SampleType::Control);
        assert_eq!(
            SampleType::from_str("condition").unwrap(),
            SampleType::Condition
        );
        assert!(SampleType::from_str("Control").is_err());
        assert!(SampleType::from_str("treated").is_err());
    }
}

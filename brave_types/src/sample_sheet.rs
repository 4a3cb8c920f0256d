//! Sample sheet validation and grouping of samples into control and condition.
//!
//! The sheet is a CSV file with one row per sample. Paired-end runs use the
//! columns `sampleID,sampleType,fastq1,fastq2`; single-end runs use
//! `sampleID,sampleType,fastq`. Column order is free, but the set of
//! columns must match the declared layout exactly.

use crate::csv_parser::CsvParser;
use crate::errors::{MissingPathError, SampleSheetError};
use crate::{LibraryLayout, SampleType};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Version of the canonical sample sheet schema understood by this crate.
pub const SAMPLE_SHEET_SCHEMA_VERSION: u32 = 1;

pub const SAMPLE_ID_COL: &str = "sampleID";
pub const SAMPLE_TYPE_COL: &str = "sampleType";

/// One validated row of the sample sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleSheetRow {
    /// Line of the row within the file; the header is line 1.
    pub line: usize,
    pub sample_id: String,
    /// Raw `sampleType` cell. Interpreted when grouping.
    pub sample_type: String,
    /// FASTQ file names in read order.
    pub fastqs: Vec<String>,
}

/// A row left out of grouping because of its `sampleType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    pub sample_id: String,
    pub sample_type: String,
}

/// What to do with rows whose `sampleType` is neither `control` nor `condition`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownSampleTypePolicy {
    /// Fail and report every offending row.
    #[default]
    Reject,
    /// Leave the rows out and record them in [`SampleGroups::skipped`].
    Skip,
}

/// A sample sheet whose columns and cells passed validation.
#[derive(Debug, Clone)]
pub struct SampleSheet {
    path: PathBuf,
    layout: LibraryLayout,
    rows: Vec<SampleSheetRow>,
}

impl SampleSheet {
    /// Read and validate the sample sheet at `path` against the schema for `layout`.
    ///
    /// Fails when the file is missing or is not a `.csv`, when its header is not
    /// exactly the expected column set, when it has no rows, or when any cell is
    /// empty.
    pub fn read(path: &Path, layout: LibraryLayout) -> Result<SampleSheet, SampleSheetError> {
        if !path.is_file() {
            return Err(MissingPathError::MissingPath {
                what: "sample sheet",
                path: path.to_path_buf(),
            }
            .into());
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            return Err(SampleSheetError::NotCsv {
                path: path.to_path_buf(),
            });
        }

        let mut parser = CsvParser::new(path)?;

        if !parser.has_exact_headers(&layout.sheet_columns()) {
            if parser.has_exact_headers(&layout.other().sheet_columns()) {
                return Err(SampleSheetError::LayoutMismatch {
                    path: path.to_path_buf(),
                    found: layout.other(),
                    declared: layout,
                });
            }
            return Err(SampleSheetError::HeaderMismatch {
                path: path.to_path_buf(),
                found: parser.headers().to_vec(),
                layout,
            });
        }

        if parser.is_empty() {
            return Err(SampleSheetError::Empty {
                path: path.to_path_buf(),
            });
        }

        let headers = parser.headers().to_vec();
        let mut rows = Vec::with_capacity(parser.len());
        for line in 0..parser.len() {
            parser.set_line(line);
            for col in &headers {
                parser.require_string(col)?;
            }
            rows.push(SampleSheetRow {
                line: parser.file_line(),
                sample_id: parser.require_string(SAMPLE_ID_COL)?,
                sample_type: parser.require_string(SAMPLE_TYPE_COL)?,
                fastqs: layout
                    .fastq_columns()
                    .iter()
                    .map(|col| parser.require_string(col))
                    .collect::<Result<_, _>>()?,
            });
        }
        log::debug!("read {} samples from {}", rows.len(), path.display());

        Ok(SampleSheet {
            path: path.to_path_buf(),
            layout,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> LibraryLayout {
        self.layout
    }

    pub fn rows(&self) -> &[SampleSheetRow] {
        &self.rows
    }

    /// Partition the rows into control and condition groups.
    pub fn group(&self, policy: UnknownSampleTypePolicy) -> Result<SampleGroups, SampleSheetError> {
        SampleGroups::from_rows(&self.rows, policy)
    }
}

/// Samples and FASTQ files of the two experimental groups, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleGroups {
    pub control: Vec<String>,
    pub condition: Vec<String>,
    pub control_fastq: Vec<String>,
    pub condition_fastq: Vec<String>,
    /// Rows left out under [`UnknownSampleTypePolicy::Skip`].
    #[serde(skip)]
    pub skipped: Vec<SkippedRow>,
}

impl SampleGroups {
    pub fn from_rows(
        rows: &[SampleSheetRow],
        policy: UnknownSampleTypePolicy,
    ) -> Result<SampleGroups, SampleSheetError> {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for row in rows {
            if let Some(&first_line) = first_seen.get(row.sample_id.as_str()) {
                return Err(SampleSheetError::DuplicateSampleId {
                    sample_id: row.sample_id.clone(),
                    line: row.line,
                    first_line,
                });
            }
            first_seen.insert(row.sample_id.as_str(), row.line);
        }

        let mut groups = SampleGroups::default();
        for row in rows {
            match SampleType::from_str(&row.sample_type) {
                Ok(SampleType::Control) => {
                    groups.control.push(row.sample_id.clone());
                    groups.control_fastq.extend(row.fastqs.iter().cloned());
                }
                Ok(SampleType::Condition) => {
                    groups.condition.push(row.sample_id.clone());
                    groups.condition_fastq.extend(row.fastqs.iter().cloned());
                }
                Err(_) => groups.skipped.push(SkippedRow {
                    line: row.line,
                    sample_id: row.sample_id.clone(),
                    sample_type: row.sample_type.clone(),
                }),
            }
        }

        if policy == UnknownSampleTypePolicy::Reject && !groups.skipped.is_empty() {
            return Err(SampleSheetError::UnknownSampleTypes {
                rows: groups.skipped,
            });
        }
        for (group, samples) in [
            (SampleType::Control, &groups.control),
            (SampleType::Condition, &groups.condition),
        ] {
            if samples.is_empty() {
                return Err(SampleSheetError::EmptyGroup { group });
            }
        }
        Ok(groups)
    }

    /// Control samples followed by condition samples.
    pub fn all_samples(&self) -> Vec<String> {
        self.control
            .iter()
            .chain(&self.condition)
            .cloned()
            .collect()
    }

    /// Every FASTQ file name referenced by either group, control first.
    pub fn all_fastqs(&self) -> impl Iterator<Item = &str> + '_ {
        self.control_fastq
            .iter()
            .chain(&self.condition_fastq)
            .map(String::as_str)
    }

    pub fn num_samples(&self) -> usize {
        self.control.len() + self.condition.len()
    }
}

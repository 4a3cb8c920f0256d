// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]

//! Terminal files of the pipeline stages.
//!
//! Every stage of the workflow finishes once a fixed set of files exists. The
//! functions in this crate compute those sets. They are pure and keep the
//! order of their inputs: samples are the outer loop, reads (if any) come
//! next and the per-stage suffixes are innermost.

pub mod aggregate;
pub mod alignment;
pub mod counts;
pub mod diffexp;
pub mod fastqc;
pub mod metrics;
pub mod qc;
pub mod stage;
pub mod trimming;

use brave_types::{LibraryLayout, SampleGroups};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString};

/// Ordered list of files a stage must produce.
pub type TerminalFiles = Vec<PathBuf>;

/// The stages of the workflow, in pipeline order.
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
)]
pub enum Stage {
    /// Download of SRA runs with sra-tools.
    #[serde(rename = "stage")]
    #[strum(serialize = "stage")]
    Download,
    #[serde(rename = "fastqc")]
    #[strum(serialize = "fastqc")]
    Fastqc,
    /// Read trimming and QC reports with fastp.
    #[serde(rename = "qc")]
    #[strum(serialize = "qc")]
    Qc,
    #[serde(rename = "trimming")]
    #[strum(serialize = "trimming")]
    Trimming,
    #[serde(rename = "alignment")]
    #[strum(serialize = "alignment")]
    Alignment,
    #[serde(rename = "counts")]
    #[strum(serialize = "counts")]
    Counts,
    #[serde(rename = "metrics")]
    #[strum(serialize = "metrics")]
    Metrics,
    #[serde(rename = "diffexp")]
    #[strum(serialize = "diffexp")]
    Diffexp,
    #[serde(rename = "aggregate")]
    #[strum(serialize = "aggregate")]
    Aggregate,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Download,
        Stage::Fastqc,
        Stage::Qc,
        Stage::Trimming,
        Stage::Alignment,
        Stage::Counts,
        Stage::Metrics,
        Stage::Diffexp,
        Stage::Aggregate,
    ];

    /// Stages run by `brave analysis`.
    pub const ANALYSIS: [Stage; 6] = [
        Stage::Qc,
        Stage::Alignment,
        Stage::Counts,
        Stage::Metrics,
        Stage::Diffexp,
        Stage::Aggregate,
    ];

    /// Sub-directory of the output root that holds this stage's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            Stage::Download => "stage",
            Stage::Fastqc => "fastqc",
            Stage::Qc => "qc",
            Stage::Trimming => "trimming",
            Stage::Alignment => "alignment",
            Stage::Counts => "counts",
            Stage::Metrics => "metrics",
            Stage::Diffexp => "diffexp",
            Stage::Aggregate => "aggregate",
        }
    }

    pub fn out_dir(self, output_root: &Path) -> PathBuf {
        output_root.join(self.dir_name())
    }
}

/// Terminal files of every analysis stage under `output_root`, keyed by stage.
pub fn analysis_targets(
    output_root: &Path,
    groups: &SampleGroups,
    layout: LibraryLayout,
) -> BTreeMap<Stage, TerminalFiles> {
    let samples = groups.all_samples();
    let out = |stage: Stage| stage.out_dir(output_root);
    BTreeMap::from([
        (Stage::Qc, qc::terminal_files(&out(Stage::Qc), &samples, layout)),
        (
            Stage::Alignment,
            alignment::terminal_files(&out(Stage::Alignment), &samples),
        ),
        (Stage::Counts, counts::terminal_files(&out(Stage::Counts))),
        (
            Stage::Metrics,
            metrics::terminal_files(&out(Stage::Alignment), &out(Stage::Metrics), &samples),
        ),
        (Stage::Diffexp, diffexp::terminal_files(&out(Stage::Diffexp))),
        (Stage::Aggregate, aggregate::terminal_files(&out(Stage::Aggregate))),
    ])
}

/// `{out}/{sample}{suffix}` for every sample, then every suffix.
pub(crate) fn expand<S: AsRef<str>>(
    out: &Path,
    samples: &[S],
    suffixes: &[&str],
) -> TerminalFiles {
    samples
        .iter()
        .flat_map(move |sample| {
            suffixes
                .iter()
                .map(move |suffix| out.join(format!("{}{suffix}", sample.as_ref())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::iter().collect::<Vec<_>>(), Stage::ALL);
        for stage in Stage::ALL {
            assert_eq!(Stage::from_str(&stage.to_string()).unwrap(), stage);
            assert_eq!(stage.to_string(), stage.dir_name());
        }
        assert!(Stage::from_str("align").is_err());
    }

    #[test]
    fn test_expand_is_sample_major() {
        assert_eq!(
            expand(Path::new("out"), &["A", "B"], &["_x", ".y"]),
            [
                PathBuf::from("out/A_x"),
                PathBuf::from("out/A.y"),
                PathBuf::from("out/B_x"),
                PathBuf::from("out/B.y"),
            ]
        );
        assert!(expand::<&str>(Path::new("out"), &[], &["_x"]).is_empty());
    }

    #[test]
    fn test_analysis_targets() {
        let groups = SampleGroups {
            control: vec!["UHR_Rep1".into()],
            condition: vec!["HBR_Rep1".into()],
            control_fastq: vec!["UHR_Rep1.fastq.gz".into()],
            condition_fastq: vec!["HBR_Rep1.fastq.gz".into()],
            skipped: vec![],
        };
        let root = Path::new("/data/out");
        let targets = analysis_targets(root, &groups, LibraryLayout::SingleEnd);

        assert_eq!(targets.keys().copied().collect::<Vec<_>>(), Stage::ANALYSIS);
        assert_eq!(
            &targets[&Stage::Qc][..3],
            [
                PathBuf::from("/data/out/qc/UHR_Rep1.trimmed.fastq.gz"),
                PathBuf::from("/data/out/qc/UHR_Rep1.html"),
                PathBuf::from("/data/out/qc/UHR_Rep1.json"),
            ]
        );
        assert_eq!(targets[&Stage::Alignment].len(), 12);
        assert_eq!(
            targets[&Stage::Metrics][0],
            PathBuf::from("/data/out/alignment/UHR_Rep1_Aligned.sortedByCoord.out.bai")
        );
        assert_eq!(
            targets[&Stage::Diffexp],
            [PathBuf::from("/data/out/diffexp/Differential_geneexp_analysis.csv")]
        );
        assert_eq!(
            targets[&Stage::Aggregate][0],
            PathBuf::from("/data/out/aggregate")
        );
    }
}

//! samtools and Picard alignment metrics.

use crate::{expand, TerminalFiles};
use std::path::Path;

/// Tool output blocks: sub-directory of the metrics directory, then the
/// per-sample suffixes.
const BLOCKS: [(&str, &[&str]); 7] = [
    ("stats", &["_Aligned.sortedByCoord.out.bam_stats.txt"]),
    ("libcomplexity_metrics", &[".est_lib_complex_metrics.txt"]),
    (
        "markdup",
        &[
            "_Aligned.sortedByCoord.out.markdup.bam",
            ".MarkDuplicates.metrics.txt",
        ],
    ),
    (
        "alignment_summary_metrics",
        &["_alignment_summary_metrics.txt"],
    ),
    (
        "gcbias_metrics",
        &[
            "_gcbias.metrics.txt",
            "_gcbias.metrics.pdf",
            "_gcbias.metrics.summary.txt",
        ],
    ),
    (
        "insert_size_metrics",
        &[".insert_size_metrics.txt", ".insert_size_Histogram.pdf"],
    ),
    ("rnaseq_metrics", &[".rna_metrics"]),
];

/// The BAM index written next to the alignments comes first, then one block
/// per metrics tool. Each block lists every sample before moving on.
pub fn terminal_files<S: AsRef<str>>(
    align_dir: &Path,
    out_dir: &Path,
    samples: &[S],
) -> TerminalFiles {
    let mut files = expand(align_dir, samples, &["_Aligned.sortedByCoord.out.bai"]);
    for (sub_dir, suffixes) in BLOCKS {
        files.extend(expand(&out_dir.join(sub_dir), samples, suffixes));
    }
    files
}

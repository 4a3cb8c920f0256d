//! Trim Galore adapter trimming.

use crate::{expand, TerminalFiles};
use brave_types::LibraryLayout;
use std::path::Path;

const PAIRED_END: [&str; 4] = [
    "_R1_val_1.fq.gz",
    "_R1.fastq.gz_trimming_report.txt",
    "_R2_val_2.fq.gz",
    "_R2.fastq.gz_trimming_report.txt",
];
const SINGLE_END: [&str; 2] = ["_trimmed.fq.gz", ".fastq.gz_trimming_report.txt"];

pub fn terminal_files<S: AsRef<str>>(
    out_dir: &Path,
    samples: &[S],
    layout: LibraryLayout,
) -> TerminalFiles {
    match layout {
        LibraryLayout::PairedEnd => expand(out_dir, samples, &PAIRED_END),
        LibraryLayout::SingleEnd => expand(out_dir, samples, &SINGLE_END),
    }
}

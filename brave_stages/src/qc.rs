//! fastp read trimming and QC reports.

use crate::{expand, TerminalFiles};
use brave_types::LibraryLayout;
use std::path::Path;

const PAIRED_END: [&str; 4] = ["_R1.trimmed.fastq.gz", "_R2.trimmed.fastq.gz", ".html", ".json"];
const SINGLE_END: [&str; 3] = [".trimmed.fastq.gz", ".html", ".json"];

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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_paired_end() {
        assert_eq!(
            terminal_files(Path::new("q"), &["A", "B"], LibraryLayout::PairedEnd),
            [
                "q/A_R1.trimmed.fastq.gz",
                "q/A_R2.trimmed.fastq.gz",
                "q/A.html",
                "q/A.json",
                "q/B_R1.trimmed.fastq.gz",
                "q/B_R2.trimmed.fastq.gz",
                "q/B.html",
                "q/B.json",
            ]
            .map(PathBuf::from)
        );
    }

    #[test]
    fn test_single_end() {
        assert_eq!(
            terminal_files(
                Path::new("test-out_dir"),
                &["HBR_Rep1", "HBR_Rep2"],
                LibraryLayout::SingleEnd
            ),
            [
                "test-out_dir/HBR_Rep1.trimmed.fastq.gz",
                "test-out_dir/HBR_Rep1.html",
                "test-out_dir/HBR_Rep1.json",
                "test-out_dir/HBR_Rep2.trimmed.fastq.gz",
                "test-out_dir/HBR_Rep2.html",
                "test-out_dir/HBR_Rep2.json",
            ]
            .map(PathBuf::from)
        );
    }

    #[test]
    fn test_no_samples() {
        let none: [&str; 0] = [];
        assert!(terminal_files(Path::new("q"), &none, LibraryLayout::PairedEnd).is_empty());
    }
}

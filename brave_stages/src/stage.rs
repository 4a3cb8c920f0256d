//! Download of SRA runs with prefetch and fasterq-dump.

use crate::TerminalFiles;
use anyhow::{Context, Result};
use brave_types::LibraryLayout;
use std::fs;
use std::path::Path;

pub const DEFAULT_EXT: &str = "fastq.gz";

/// The FASTQ files of every accession, then the `.sra` archive of every
/// accession. Each accession gets its own sub-directory of `out_dir`.
pub fn terminal_files<S: AsRef<str>>(
    out_dir: &Path,
    accessions: &[S],
    layout: LibraryLayout,
    ext: &str,
) -> TerminalFiles {
    let reads: &[&str] = match layout {
        LibraryLayout::PairedEnd => &["_1", "_2"],
        LibraryLayout::SingleEnd => &[""],
    };
    let fastqs = accessions.iter().flat_map(move |acc| {
        let acc = acc.as_ref();
        reads
            .iter()
            .map(move |read| out_dir.join(acc).join(format!("{acc}{read}.{ext}")))
    });
    let archives = accessions.iter().map(|acc| {
        let acc = acc.as_ref();
        out_dir.join(acc).join(format!("{acc}.sra"))
    });
    fastqs.chain(archives).collect()
}

/// Read an SRA accession list: one accession per line. Surrounding
/// whitespace is trimmed and blank lines are skipped.
pub fn read_accession_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading SRA accession list {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

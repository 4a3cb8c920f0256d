//! FastQC reports of the raw reads.

use crate::TerminalFiles;
use anyhow::{anyhow, bail, Context, Result};
use brave_types::{LibraryLayout, MissingPathError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FASTQ_EXT: &str = ".fastq.gz";

/// FASTQ files of `in_dir` that end in `fastq_ext`, grouped per sample.
///
/// Paired-end files are named `{sample}_{num}_{read}{fastq_ext}` and grouped
/// under `{sample}_{num}`. Single-end files form one group each, keyed by the
/// name without `fastq_ext`. Files are listed in sorted order.
pub fn fastq_groups(
    in_dir: &Path,
    layout: LibraryLayout,
    fastq_ext: &str,
) -> Result<BTreeMap<String, Vec<PathBuf>>> {
    if !in_dir.is_dir() {
        return Err(MissingPathError::MissingPath {
            what: "FastQC input directory",
            path: in_dir.to_path_buf(),
        }
        .into());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(in_dir).with_context(|| in_dir.display().to_string())? {
        let entry = entry.with_context(|| in_dir.display().to_string())?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            bail!("FASTQ file name {name:?} in {} is not valid UTF-8", in_dir.display());
        };
        if name.ends_with(fastq_ext) && entry.path().is_file() {
            names.push(name.to_string());
        }
    }
    names.sort();

    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for name in names {
        let key = match layout {
            LibraryLayout::PairedEnd => {
                let parts: Vec<_> = name.rsplitn(3, '_').collect();
                let [_read, num, sample] = &parts[..] else {
                    bail!(
                        "paired-end FASTQ {name:?} in {} is not named {{sample}}_{{num}}_{{read}}{fastq_ext}",
                        in_dir.display()
                    );
                };
                format!("{sample}_{num}")
            }
            LibraryLayout::SingleEnd => name
                .strip_suffix(fastq_ext)
                .unwrap_or(&name)
                .to_string(),
        };
        groups.entry(key).or_default().push(in_dir.join(&name));
    }
    Ok(groups)
}

/// A zip archive and an html report per FASTQ file, named after the file with
/// `fastq_ext` replaced. A name without that extension keeps its full name.
pub fn terminal_files<P: AsRef<Path>>(
    out_dir: &Path,
    fastqs: &[P],
    fastq_ext: &str,
) -> Result<TerminalFiles> {
    let mut files = Vec::with_capacity(2 * fastqs.len());
    for fastq in fastqs {
        let fastq = fastq.as_ref();
        let name = fastq
            .file_name()
            .ok_or_else(|| anyhow!("FASTQ path {fastq:?} does not name a file"))?
            .to_string_lossy();
        let stem = name.strip_suffix(fastq_ext).unwrap_or(&name);
        files.extend(
            ["_fastqc.zip", "_fastqc.html"]
                .map(|suffix| out_dir.join(format!("{stem}{suffix}"))),
        );
    }
    Ok(files)
}

use crate::errors::MissingPathError;
use crate::sample_sheet::SampleGroups;
use std::collections::HashSet;
use std::path::Path;

/// Check that every FASTQ file named by `groups` exists under `in_dir`.
///
/// All missing files are collected, in sheet order and without repeats, and
/// reported together.
pub fn check_fastq_files(in_dir: &Path, groups: &SampleGroups) -> Result<(), MissingPathError> {
    let mut seen = HashSet::new();
    let missing: Vec<String> = groups
        .all_fastqs()
        .filter(|name| seen.insert(*name))
        .filter(|name| !in_dir.join(name).is_file())
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingPathError::MissingFastqs {
            in_dir: in_dir.to_path_buf(),
            missing,
        })
    }
}

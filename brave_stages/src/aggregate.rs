//! MultiQC report of the whole run.

use crate::TerminalFiles;
use std::path::Path;

pub const REPORT_FILE: &str = "brave_analysis_aggregated_report.html";

/// The report directory itself, then the report.
pub fn terminal_files(out_dir: &Path) -> TerminalFiles {
    vec![out_dir.to_path_buf(), out_dir.join(REPORT_FILE)]
}

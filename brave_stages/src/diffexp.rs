//! DESeq2 differential expression.

use crate::TerminalFiles;
use std::path::Path;

pub const RESULTS_FILE: &str = "Differential_geneexp_analysis.csv";

pub fn terminal_files(out_dir: &Path) -> TerminalFiles {
    vec![out_dir.join(RESULTS_FILE)]
}

//! featureCounts gene counts.

use crate::TerminalFiles;
use std::path::Path;

pub const COUNTS_FILE: &str = "counts.out";

pub fn terminal_files(out_dir: &Path) -> TerminalFiles {
    vec![
        out_dir.join(COUNTS_FILE),
        out_dir.join(format!("{COUNTS_FILE}.summary")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_counts_outputs() {
        assert_eq!(
            terminal_files(Path::new("c")),
            [PathBuf::from("c/counts.out"), PathBuf::from("c/counts.out.summary")]
        );
    }
}

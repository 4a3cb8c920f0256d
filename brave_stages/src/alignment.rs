//! STAR alignment.

use crate::{expand, TerminalFiles};
use std::path::Path;

const OUTPUTS: [&str; 6] = [
    "_Aligned.sortedByCoord.out.bam",
    "_ReadsPerGene.out.tab",
    "_SJ.out.tab",
    "_Log.out",
    "_Log.final.out",
    "_Log.progress.out",
];

pub fn terminal_files<S: AsRef<str>>(out_dir: &Path, samples: &[S]) -> TerminalFiles {
    expand(out_dir, samples, &OUTPUTS)
}

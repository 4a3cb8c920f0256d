//! featureCounts matrices and the DESeq2 sample design.

use crate::errors::DiffExpError;
use std::path::Path;
use strum_macros::Display;

pub const GENE_ID_COL: &str = "Geneid";

/// Gene annotation columns written by featureCounts ahead of the samples.
const ANNOTATION_COLS: [&str; 5] = ["Chr", "Start", "End", "Strand", "Length"];

/// Read counts with one row per gene and one column per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    genes: Vec<String>,
    samples: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl CountMatrix {
    /// Load a tab-delimited featureCounts table. Lines starting with `#` are
    /// skipped and the annotation columns are ignored.
    pub fn read_featurecounts(path: &Path) -> Result<CountMatrix, DiffExpError> {
        if !path.is_file() {
            return Err(DiffExpError::MissingCounts {
                path: path.to_path_buf(),
            });
        }
        let read_err = |source: csv::Error| DiffExpError::Read {
            path: path.to_path_buf(),
            source,
        };
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .comment(Some(b'#'))
            .from_path(path)
            .map_err(read_err)?;

        let headers = rdr.headers().map_err(read_err)?.clone();
        let gene_col = headers
            .iter()
            .position(|h| h.trim() == GENE_ID_COL)
            .ok_or_else(|| DiffExpError::NoGeneid {
                path: path.to_path_buf(),
            })?;
        let sample_cols: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|&(i, h)| i != gene_col && !ANNOTATION_COLS.contains(&h.trim()))
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect();
        if sample_cols.is_empty() {
            return Err(DiffExpError::NoSamples {
                path: path.to_path_buf(),
            });
        }

        let mut genes = Vec::new();
        let mut counts = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(read_err)?;
            let line = record.position().map_or(0, csv::Position::line);
            let row = sample_cols
                .iter()
                .map(|(i, sample)| {
                    let value = record.get(*i).unwrap_or_default().trim();
                    value.parse::<u64>().map_err(|_| DiffExpError::BadCount {
                        path: path.to_path_buf(),
                        line,
                        column: sample.clone(),
                        value: value.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            genes.push(record.get(gene_col).unwrap_or_default().trim().to_string());
            counts.push(row);
        }

        Ok(CountMatrix {
            genes,
            samples: sample_cols.into_iter().map(|(_, s)| s).collect(),
            counts,
        })
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Remove genes without a single read in any sample. Returns the number removed.
    pub fn drop_unexpressed(&mut self) -> usize {
        let before = self.genes.len();
        let keep: Vec<bool> = self
            .counts
            .iter()
            .map(|row| row.iter().sum::<u64>() > 0)
            .collect();
        let mut flags = keep.iter();
        self.genes.retain(|_| *flags.next().unwrap_or(&false));
        let mut flags = keep.iter();
        self.counts.retain(|_| *flags.next().unwrap_or(&false));
        before - self.genes.len()
    }

    /// Write the transposed matrix as CSV: one row per sample, one column per gene.
    pub fn write_transposed_csv(&self, path: &Path) -> Result<(), DiffExpError> {
        let write_err = |source: csv::Error| DiffExpError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut wtr = csv::Writer::from_path(path).map_err(write_err)?;
        wtr.write_record(std::iter::once("Sample").chain(self.genes.iter().map(String::as_str)))
            .map_err(write_err)?;
        for (j, sample) in self.samples.iter().enumerate() {
            let row = self.counts.iter().map(|gene_counts| gene_counts[j].to_string());
            wtr.write_record(std::iter::once(sample.clone()).chain(row))
                .map_err(write_err)?;
        }
        wtr.flush().map_err(|e| write_err(csv::Error::from(e)))?;
        Ok(())
    }
}

/// Level of the `Condition` design factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Condition {
    Control,
    Knockout,
}

/// Assign the first `num_control` samples to `Control` and the remaining
/// `num_condition` samples to `Knockout`.
pub fn design(
    samples: &[String],
    num_control: usize,
    num_condition: usize,
) -> Result<Vec<(String, Condition)>, DiffExpError> {
    if samples.len() != num_control + num_condition {
        return Err(DiffExpError::SampleCountMismatch {
            found: samples.len(),
            num_control,
            num_condition,
        });
    }
    Ok(samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let condition = if i < num_control {
                Condition::Control
            } else {
                Condition::Knockout
            };
            (sample.clone(), condition)
        })
        .collect())
}

/// Write the design as a `Sample,Condition` CSV.
pub fn write_metadata_csv(
    path: &Path,
    design: &[(String, Condition)],
) -> Result<(), DiffExpError> {
    let write_err = |source: csv::Error| DiffExpError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(write_err)?;
    wtr.write_record(["Sample", "Condition"]).map_err(write_err)?;
    for (sample, condition) in design {
        wtr.write_record([sample.as_str(), condition.to_string().as_str()])
            .map_err(write_err)?;
    }
    wtr.flush().map_err(|e| write_err(csv::Error::from(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const COUNTS: &str = "\
# Program:featureCounts v2.0.1; Command:\"featureCounts\" \"-a\" \"genes.gtf\"
Geneid\tChr\tStart\tEnd\tStrand\tLength\tUHR_Rep1\tHBR_Rep1\tHBR_Rep2
ENSG01\tchr22\t100\t200\t+\t101\t5\t0\t3
ENSG02\tchr22\t300\t400\t-\t101\t0\t0\t0
ENSG03\tchr22\t500\t600\t+\t101\t12\t7\t9
";

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_read_and_filter() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("counts.out");
        fs::write(&path, COUNTS)?;

        let mut matrix = CountMatrix::read_featurecounts(&path)?;
        assert_eq!(matrix.samples(), strings(&["UHR_Rep1", "HBR_Rep1", "HBR_Rep2"]));
        assert_eq!(matrix.genes(), strings(&["ENSG01", "ENSG02", "ENSG03"]));

        assert_eq!(matrix.drop_unexpressed(), 1);
        assert_eq!(matrix.genes(), strings(&["ENSG01", "ENSG03"]));

        let out = dir.path().join("counts.csv");
        matrix.write_transposed_csv(&out)?;
        assert_eq!(
            fs::read_to_string(&out)?,
            "Sample,ENSG01,ENSG03\nUHR_Rep1,5,12\nHBR_Rep1,0,7\nHBR_Rep2,3,9\n"
        );
        Ok(())
    }

    #[test]
    fn test_plain_matrix_without_annotation() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("counts.tsv");
        fs::write(&path, "Geneid\tA\tB\ng1\t1\t2\n")?;
        let matrix = CountMatrix::read_featurecounts(&path)?;
        assert_eq!(matrix.samples(), strings(&["A", "B"]));
        Ok(())
    }

    #[test]
    fn test_read_errors() -> anyhow::Result<()> {
        let dir = tempdir()?;
        assert!(matches!(
            CountMatrix::read_featurecounts(&dir.path().join("absent.out")),
            Err(DiffExpError::MissingCounts { .. })
        ));

        let no_gene = dir.path().join("no_gene.tsv");
        fs::write(&no_gene, "gene\tA\ng1\t1\n")?;
        assert!(matches!(
            CountMatrix::read_featurecounts(&no_gene),
            Err(DiffExpError::NoGeneid { .. })
        ));

        let bad = dir.path().join("bad.tsv");
        fs::write(&bad, "Geneid\tA\ng1\t1\ng2\t1.5\n")?;
        match CountMatrix::read_featurecounts(&bad) {
            Err(DiffExpError::BadCount {
                line, column, value, ..
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "A");
                assert_eq!(value, "1.5");
            }
            other => panic!("expected a bad count, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_design() -> anyhow::Result<()> {
        let samples = strings(&["c1", "c2", "k1"]);
        assert_eq!(
            design(&samples, 2, 1)?,
            vec![
                ("c1".to_string(), Condition::Control),
                ("c2".to_string(), Condition::Control),
                ("k1".to_string(), Condition::Knockout),
            ]
        );
        let err = design(&samples, 2, 2).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"The counts file has 3 samples, but 2 control and 2 condition samples were given."
        );

        let dir = tempdir()?;
        let path = dir.path().join("metadata.csv");
        write_metadata_csv(&path, &design(&samples, 1, 2)?)?;
        assert_eq!(
            fs::read_to_string(path)?,
            "Sample,Condition\nc1,Control\nc2,Knockout\nk1,Knockout\n"
        );
        Ok(())
    }
}

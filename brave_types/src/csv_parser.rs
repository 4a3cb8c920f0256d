use crate::errors::SampleSheetError;
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Reads a sample sheet CSV into trimmed headers and rows, and gives
/// line-aware access to cells for error messages.
pub struct CsvParser {
    filename: PathBuf,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
    col_map: HashMap<String, usize>,
    line: usize,
}

impl CsvParser {
    pub fn new(filename: &Path) -> Result<CsvParser, SampleSheetError> {
        let read_err = |source: csv::Error| SampleSheetError::Read {
            path: filename.to_path_buf(),
            source,
        };
        let file = File::open(filename).map_err(|e| read_err(e.into()))?;
        let mut rdr = csv::Reader::from_reader(BufReader::new(file));

        let mut headers = rdr.headers().map_err(read_err)?.clone();
        headers.trim();
        let headers: Vec<_> = headers.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let mut record = result.map_err(read_err)?;
            record.trim();
            rows.push(record);
        }

        let col_map = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Ok(CsvParser {
            filename: filename.to_path_buf(),
            headers,
            rows,
            col_map,
            line: 0,
        })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Headers found in CSV
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Set the data row (not including the header) to pull data from
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Line number of the current row within the file, counting the header as line 1.
    pub fn file_line(&self) -> usize {
        self.line + 2
    }

    /// True when the header holds exactly the `expected` columns, in any order.
    pub fn has_exact_headers(&self, expected: &[&str]) -> bool {
        self.headers.len() == expected.len()
            && expected.iter().all(|col| self.col_map.contains_key(*col))
    }

    /// Get a string from column `col` on the current line.
    /// Returns None for an empty cell or an unknown column.
    pub fn try_get_string(&self, col: &str) -> Option<String> {
        let &i = self.col_map.get(col)?;
        let val = self.rows[self.line].get(i)?.trim();
        if val.is_empty() {
            None
        } else {
            Some(val.to_string())
        }
    }

    /// Get a string from column `col` on the current line.
    /// Returns an error naming the line and column when the cell is empty.
    pub fn require_string(&self, col: &str) -> Result<String, SampleSheetError> {
        self.try_get_string(col)
            .ok_or_else(|| SampleSheetError::EmptyCell {
                path: self.filename.clone(),
                line: self.file_line(),
                column: col.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_trimmed_headers_and_cells() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sheet.csv");
        let mut f = File::create(&path)?;
        writeln!(f, "sampleID , sampleType,fastq")?;
        writeln!(f, " S1 ,control, S1.fastq.gz")?;
        writeln!(f, "S2,condition,")?;
        drop(f);

        let mut parser = CsvParser::new(&path)?;
        assert_eq!(parser.len(), 2);
        assert_eq!(parser.headers(), ["sampleID", "sampleType", "fastq"]);
        assert!(parser.has_exact_headers(&["fastq", "sampleID", "sampleType"]));
        assert!(!parser.has_exact_headers(&["sampleID", "sampleType"]));

        assert_eq!(parser.require_string("sampleID")?, "S1");
        assert_eq!(parser.try_get_string("fastq").as_deref(), Some("S1.fastq.gz"));

        parser.set_line(1);
        assert_eq!(parser.file_line(), 3);
        assert!(parser.try_get_string("fastq").is_none());
        match parser.require_string("fastq") {
            Err(SampleSheetError::EmptyCell { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "fastq");
            }
            other => panic!("expected an empty cell error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_ragged_rows_are_rejected() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, "sampleID,sampleType,fastq\nS1,control\n")?;
        assert!(matches!(
            CsvParser::new(&path),
            Err(SampleSheetError::Read { .. })
        ));
        Ok(())
    }
}

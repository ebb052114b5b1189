//! CSV table import with required-column validation.
//!
//! Parses simple comma-separated numeric tables (header row plus data
//! rows). A missing required column or an unparsable cell rejects the
//! whole upload with `DataFormat`; nothing is partially imported.

use crate::error::{StoreError, StoreResult};

/// A parsed numeric table, column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl CsvTable {
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Column lookup that reports a `DataFormat` error when absent.
    pub fn require_column(&self, name: &str) -> StoreResult<&[f64]> {
        self.column(name)
            .ok_or_else(|| StoreError::data_format(format!("missing column '{name}'")))
    }
}

/// Parse `text` and verify every name in `required` appears as a header.
pub fn parse_csv(text: &str, required: &[&str]) -> StoreResult<CsvTable> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header_line = lines
        .next()
        .ok_or_else(|| StoreError::data_format("empty table"))?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();

    for name in required {
        if !headers.iter().any(|h| h == name) {
            return Err(StoreError::data_format(format!(
                "missing column '{name}'"
            )));
        }
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (line_no, line) in lines.enumerate() {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != headers.len() {
            return Err(StoreError::data_format(format!(
                "row {} has {} cells, expected {}",
                line_no + 2,
                cells.len(),
                headers.len()
            )));
        }
        for (col, cell) in columns.iter_mut().zip(&cells) {
            let value: f64 = cell.parse().map_err(|_| {
                StoreError::data_format(format!(
                    "unparsable cell '{}' at row {}",
                    cell,
                    line_no + 2
                ))
            })?;
            col.push(value);
        }
    }

    if columns[0].is_empty() {
        return Err(StoreError::data_format("table has no data rows"));
    }

    Ok(CsvTable { headers, columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSOR_CSV: &str = "\
temperature,pressure,flow
350.1,10.2,2.01
349.8,9.9,1.98
351.0,10.1,2.05
";

    #[test]
    fn parses_numeric_table() {
        let table = parse_csv(SENSOR_CSV, &["temperature", "pressure", "flow"]).unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column("pressure").unwrap()[1], 9.9);
    }

    #[test]
    fn missing_required_column_rejected() {
        let err = parse_csv(SENSOR_CSV, &["temperature", "vibration"]).unwrap_err();
        assert!(matches!(err, StoreError::DataFormat { .. }));
        assert!(err.to_string().contains("vibration"));
    }

    #[test]
    fn unparsable_cell_rejects_whole_upload() {
        let text = "a,b\n1.0,2.0\n3.0,oops\n";
        assert!(matches!(
            parse_csv(text, &["a", "b"]),
            Err(StoreError::DataFormat { .. })
        ));
    }

    #[test]
    fn ragged_row_rejected() {
        let text = "a,b\n1.0,2.0\n3.0\n";
        assert!(parse_csv(text, &["a"]).is_err());
    }

    #[test]
    fn empty_table_rejected() {
        assert!(parse_csv("", &[]).is_err());
        assert!(parse_csv("a,b\n", &["a"]).is_err());
    }
}

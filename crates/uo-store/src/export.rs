//! CSV and plain-text export.
//!
//! Curves and series export as CSV; a formula evaluation exports as a
//! human-readable text report of inputs and outputs.

use uo_core::{FormulaResult, Inputs, ResponseCurve};

use crate::error::{StoreError, StoreResult};

/// A response curve as two-column CSV. NaN gaps export as empty cells.
pub fn curve_to_csv(curve: &ResponseCurve) -> String {
    let mut out = format!("{},{}\n", curve.x_name, curve.y_name);
    for &(x, y) in &curve.points {
        if y.is_nan() {
            out.push_str(&format!("{x},\n"));
        } else {
            out.push_str(&format!("{x},{y}\n"));
        }
    }
    out
}

/// Arbitrary named columns as CSV. Columns must share one length.
pub fn series_to_csv(headers: &[&str], columns: &[&[f64]]) -> StoreResult<String> {
    if headers.len() != columns.len() {
        return Err(StoreError::data_format(
            "header and column counts differ",
        ));
    }
    if columns.is_empty() {
        return Err(StoreError::data_format("no columns to export"));
    }
    let rows = columns[0].len();
    if columns.iter().any(|c| c.len() != rows) {
        return Err(StoreError::data_format("columns have unequal lengths"));
    }

    let mut out = headers.join(",");
    out.push('\n');
    for row in 0..rows {
        let line: Vec<String> = columns.iter().map(|c| c[row].to_string()).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    Ok(out)
}

/// Plain-text report of one evaluation: inputs, then outputs with units.
pub fn report_to_text(title: &str, inputs: &Inputs, result: &FormulaResult) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.len()));
    out.push_str("\n\nInputs\n");
    for (name, value) in inputs.iter() {
        out.push_str(&format!("  {name} = {value}\n"));
    }
    out.push_str("\nResults\n");
    for value in result.values() {
        if value.unit.is_empty() {
            out.push_str(&format!("  {} = {:.6}\n", value.name, value.value));
        } else {
            out.push_str(&format!(
                "  {} = {:.6} {}\n",
                value.name, value.value, value.unit
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uo_core::ResponseCurve;

    #[test]
    fn curve_csv_has_header_and_gaps() {
        let curve = ResponseCurve {
            x_name: "delta_t".to_string(),
            y_name: "q".to_string(),
            points: vec![(1.0, 10.0), (2.0, f64::NAN), (3.0, 30.0)],
        };
        let csv = curve_to_csv(&curve);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "delta_t,q");
        assert_eq!(lines[1], "1,10");
        assert_eq!(lines[2], "2,");
        assert_eq!(lines[3], "3,30");
    }

    #[test]
    fn series_csv_rejects_ragged_columns() {
        let a = [1.0, 2.0];
        let b = [1.0];
        assert!(series_to_csv(&["a", "b"], &[&a, &b]).is_err());
    }

    #[test]
    fn series_csv_roundtrips_through_import() {
        let t = [0.0, 1.0, 2.0];
        let i = [10.0, 25.0, 40.0];
        let csv = series_to_csv(&["day", "infected"], &[&t, &i]).unwrap();
        let table = crate::import::parse_csv(&csv, &["day", "infected"]).unwrap();
        assert_eq!(table.column("infected").unwrap(), &i);
    }

    #[test]
    fn report_lists_inputs_and_units() {
        let inputs = Inputs::new().with("delta_t", 70.0).with("area", 1.0);
        let result = FormulaResult::new().with("Heat Loss per Area", 233.33, "W/m2");
        let text = report_to_text("Composite Wall", &inputs, &result);
        assert!(text.contains("Composite Wall"));
        assert!(text.contains("delta_t = 70"));
        assert!(text.contains("Heat Loss per Area = 233.330000 W/m2"));
    }
}

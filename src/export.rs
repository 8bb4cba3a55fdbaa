// src/export.rs
//! Tabular export: heterogeneous records to a column-filtered CSV blob.
//!
//! The caller-declared column order is authoritative. Fields a record
//! carries beyond the declared columns are dropped; declared columns a
//! record lacks render as empty cells. Quoting follows standard CSV
//! rules (delimiter, quote, or newline in a field triggers quoting,
//! embedded quotes doubled).

use crate::error::GatewayError;
use crate::model::{Record, Scalar};

/// Serializes the records into CSV text: one header row of the column
/// names, then one row per record.
pub fn to_csv<S: AsRef<str>>(records: &[Record], columns: &[S]) -> Result<String, GatewayError> {
    // A zero-column export has no header row to write.
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(columns.iter().map(|column| column.as_ref()))?;

    for record in records {
        writer.write_record(columns.iter().map(|column| {
            record
                .get(column.as_ref())
                .map_or_else(String::new, Scalar::csv_field)
        }))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GatewayError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| GatewayError::InternalError {
        message: "CSV output was not valid UTF-8".to_string(),
        source: Some(Box::new(e)),
    })
}

/// Computes the column union across all records, first-seen order.
///
/// For exports with no fixed column contract (the workspace-database
/// route), this reproduces what a data frame would infer from the
/// records themselves.
pub fn inferred_columns(records: &[Record]) -> Vec<String> {
    let mut columns = Vec::new();

    for record in records {
        for field in record.keys() {
            if !columns.contains(field) {
                columns.push(field.clone());
            }
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, Scalar)]) -> Record {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn empty_batch_exports_exactly_the_header_row() {
        let csv = to_csv(&[], &["Name", "Tags"]).unwrap();
        assert_eq!(csv, "Name,Tags\n");
    }

    #[test]
    fn zero_columns_export_nothing() {
        let csv = to_csv(&[], &[] as &[&str]).unwrap();
        assert_eq!(csv, "");
    }

    #[test]
    fn missing_columns_render_as_empty_cells() {
        let records = vec![
            record(&[("Name", Scalar::from("one"))]),
            record(&[("Name", Scalar::from("two"))]),
        ];
        let csv = to_csv(&records, &["Name", "Ghost"]).unwrap();
        assert_eq!(csv, "Name,Ghost\none,\ntwo,\n");
    }

    #[test]
    fn undeclared_fields_are_dropped() {
        let records = vec![record(&[
            ("Name", Scalar::from("one")),
            ("Secret", Scalar::from("hidden")),
        ])];
        let csv = to_csv(&records, &["Name"]).unwrap();
        assert_eq!(csv, "Name\none\n");
    }

    #[test]
    fn delimiters_quotes_and_newlines_are_quoted() {
        let records = vec![record(&[
            ("a", Scalar::from("plain")),
            ("b", Scalar::from("with, comma")),
            ("c", Scalar::from("say \"hi\"")),
            ("d", Scalar::from("two\nlines")),
        ])];
        let csv = to_csv(&records, &["a", "b", "c", "d"]).unwrap();
        assert_eq!(
            csv,
            "a,b,c,d\nplain,\"with, comma\",\"say \"\"hi\"\"\",\"two\nlines\"\n"
        );
    }

    #[test]
    fn null_cells_export_as_empty() {
        let records = vec![record(&[
            ("a", Scalar::Null),
            ("b", Scalar::Number(7.0)),
        ])];
        let csv = to_csv(&records, &["a", "b"]).unwrap();
        assert_eq!(csv, "a,b\n,7\n");
    }

    #[test]
    fn inferred_columns_union_in_first_seen_order() {
        let records = vec![
            record(&[("Name", Scalar::from("x")), ("Tags", Scalar::from("t"))]),
            record(&[("Name", Scalar::from("y")), ("Due", Scalar::from("d"))]),
        ];
        assert_eq!(inferred_columns(&records), vec!["Name", "Tags", "Due"]);
        assert!(inferred_columns(&[]).is_empty());
    }
}

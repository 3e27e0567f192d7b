//! Feature Table Output
//!
//! Writes feature rows as CSV or as JSON lines.

use super::features::FunctionFeatures;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// CSV header, in column order.
pub const CSV_COLUMNS: &[&str] = &[
    "function_name",
    "file_name",
    "cyclomatic_complexity",
    "parameter_count",
    "local_variable_count",
    "body_size_stmts",
    "token_count",
    "is_complex_return",
    "is_generic",
    "call_site_count",
];

/// Output format for feature rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Write `rows` to `out` in `format`.
pub fn write_rows<W: Write>(
    rows: &[FunctionFeatures],
    format: OutputFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(rows, out),
        OutputFormat::Json => write_json_lines(rows, out),
    }
}

fn write_csv<W: Write>(rows: &[FunctionFeatures], out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", CSV_COLUMNS.join(","))?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            csv_field(&row.function_name),
            csv_field(&row.file_name),
            row.cyclomatic_complexity,
            row.parameter_count,
            row.local_variable_count,
            row.body_size_stmts,
            row.token_count,
            row.is_complex_return,
            row.is_generic,
            row.call_site_count,
        )?;
    }
    Ok(())
}

fn write_json_lines<W: Write>(rows: &[FunctionFeatures], out: &mut W) -> io::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Quote a field if it contains a separator, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FunctionFeatures {
        FunctionFeatures {
            function_name: "scalar_transform".to_string(),
            file_name: "scalar.rs".to_string(),
            cyclomatic_complexity: 2,
            parameter_count: 1,
            local_variable_count: 0,
            body_size_stmts: 3,
            token_count: 28,
            is_complex_return: 0,
            is_generic: 0,
            call_site_count: 4,
        }
    }

    #[test]
    fn test_csv_output() {
        let mut out = Vec::new();
        write_rows(&[sample()], OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_COLUMNS.join(","));
        assert_eq!(lines.next().unwrap(), "scalar_transform,scalar.rs,2,1,0,3,28,0,0,4");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_header_only_for_no_rows() {
        let mut out = Vec::new();
        write_rows(&[], OutputFormat::Csv, &mut out).unwrap();
        assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_json_lines_output() {
        let mut out = Vec::new();
        write_rows(&[sample(), sample()], OutputFormat::Json, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<FunctionFeatures> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows, vec![sample(), sample()]);
    }

    #[test]
    fn test_format_names() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }
}

//! Output rendering: boxed tables, JSON and CSV.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;

/// Output format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable boxed table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
    /// CSV with a header row.
    Csv,
}

/// Boxed text table.
#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing cells render empty.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    /// Writes the table to `w`.
    pub fn render<W: Write>(&self, w: &mut W) -> Result<()> {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|n| "─".repeat(n + 2)).collect();
            format!("{}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!(" {:<width$} ", cell, width = n)
                })
                .collect();
            format!("│{}│", padded.join("│"))
        };

        writeln!(w, "\n{}", self.title)?;
        writeln!(w, "{}", rule("┌", "┬", "┐"))?;
        writeln!(w, "{}", line(&self.headers))?;
        writeln!(w, "{}", rule("├", "┼", "┤"))?;
        for row in &self.rows {
            writeln!(w, "{}", line(row))?;
        }
        writeln!(w, "{}", rule("└", "┴", "┘"))?;
        Ok(())
    }
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

/// Writes one CSV record per row, with a header taken from the field names.
pub fn write_csv<W: Write, T: Serialize>(w: W, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Formats a float with fixed decimals.
pub fn fmt_num(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        value: f64,
        note: Option<f64>,
    }

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new("Greeks", &["Greek", "Value"]);
        table.push_row(vec!["delta".into(), "0.4455".into()]);
        table.push_row(vec!["gamma".into()]);

        let mut out = Vec::new();
        table.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Greeks"));
        assert!(text.contains("│ delta │ 0.4455 │"));
        assert!(text.contains("│ gamma │        │"));
        let widths: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with('│') || l.starts_with('┌'))
            .map(|l| l.chars().count())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_csv_has_header_and_blank_none() {
        let rows = [
            Row { name: "a", value: 1.5, note: None },
            Row { name: "b", value: 2.0, note: Some(3.0) },
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "name,value,note\na,1.5,\nb,2.0,3.0\n");
    }

    #[test]
    fn test_json_is_pretty() {
        let mut out = Vec::new();
        write_json(&mut out, &Row { name: "x", value: 1.0, note: None }).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n  \"name\": \"x\""));
        assert!(text.ends_with("}\n"));
    }
}

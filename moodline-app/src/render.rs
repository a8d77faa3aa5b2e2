//! Rendering of the assembled table to stdout.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use moodline_pipeline::{COLUMNS, ResultSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Boxed table for reading in a terminal.
    Table,
    /// CSV with a header row, suitable for spreadsheets.
    Csv,
    /// Pretty-printed JSON array of row objects.
    Json,
}

pub fn render(results: &ResultSet, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => render_table(results, &mut out),
        OutputFormat::Csv => render_csv(results, &mut out),
        OutputFormat::Json => render_json(results, &mut out),
    }
}

fn render_table(results: &ResultSet, out: &mut impl Write) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(COLUMNS);

    for row in results {
        table.add_row(vec![
            Cell::new(&row.handle),
            Cell::new(row.sequence),
            Cell::new(row.timestamp),
            Cell::new(row.id),
            Cell::new(format!("{:.4}", row.compound)),
            Cell::new(format!("{:.3}", row.positive)),
            Cell::new(format!("{:.3}", row.neutral)),
            Cell::new(format!("{:.3}", row.negative)),
            Cell::new(&row.text),
        ]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

fn render_csv(results: &ResultSet, out: &mut impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    // Header goes out even for an empty table.
    writer.write_record(COLUMNS)?;
    for row in results {
        writer.write_record(&[
            row.handle.clone(),
            row.sequence.to_string(),
            row.timestamp.to_string(),
            row.id.to_string(),
            row.compound.to_string(),
            row.positive.to_string(),
            row.neutral.to_string(),
            row.negative.to_string(),
            row.text.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn render_json(results: &ResultSet, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use moodline_pipeline::SentimentRecord;

    use super::*;

    fn sample() -> ResultSet {
        vec![
            SentimentRecord {
                handle: "BBCWorld".to_string(),
                sequence: 1,
                timestamp: 1_539_202_764,
                id: 1050118621198921700,
                compound: 0.8439,
                positive: 0.752,
                neutral: 0.248,
                negative: 0.0,
                text: "all emojis are equal".to_string(),
            },
            SentimentRecord {
                handle: "BBCWorld".to_string(),
                sequence: 2,
                timestamp: 1_539_202_700,
                id: 1050118621198921000,
                compound: -0.3612,
                positive: 0.0,
                neutral: 0.625,
                negative: 0.375,
                text: "a text, with commas".to_string(),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn csv_starts_with_the_header_row() {
        let mut buf = Vec::new();
        render_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "handle,sequence,timestamp,id,compound,positive,neutral,negative,text"
        );
        // Embedded commas force quoting.
        assert!(lines.nth(1).unwrap().ends_with("\"a text, with commas\""));
    }

    #[test]
    fn csv_for_an_empty_table_is_just_the_header() {
        let mut buf = Vec::new();
        render_csv(&ResultSet::default(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn json_round_trips_as_an_array_of_rows() {
        let mut buf = Vec::new();
        render_json(&sample(), &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = value.as_array().expect("top-level array");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["handle"], "BBCWorld");
        assert_eq!(rows[0]["sequence"], 1);
        assert_eq!(rows[1]["negative"], 0.375);
    }

    #[test]
    fn table_output_shows_headers_and_values() {
        let mut buf = Vec::new();
        render_table(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("compound"));
        assert!(text.contains("BBCWorld"));
        assert!(text.contains("0.8439"));
    }
}

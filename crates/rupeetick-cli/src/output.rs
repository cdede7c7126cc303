use std::io::{self, Write};

use rupeetick_core::Envelope;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(&mut out, envelope)?,
    }

    out.flush()?;
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> io::Result<()> {
    let meta = &envelope.meta;
    writeln!(out, "request_id  : {}", meta.request_id)?;
    if let Some(trace_id) = &meta.trace_id {
        writeln!(out, "trace_id    : {trace_id}")?;
    }
    writeln!(out, "schema      : {}", meta.schema_version)?;
    writeln!(out, "generated_at: {}", meta.generated_at)?;
    if let Some(origin) = meta.origin {
        writeln!(out, "origin      : {origin}")?;
    }
    writeln!(out, "usd_inr     : {}", meta.exchange_rate)?;
    writeln!(out, "latency_ms  : {}", meta.latency_ms)?;

    if !meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    writeln!(out)?;
    match &envelope.data {
        Value::Object(fields) => write_object(out, fields, 0)?,
        other => writeln!(out, "{}", scalar(other))?,
    }

    Ok(())
}

fn write_object<W: Write>(out: &mut W, fields: &Map<String, Value>, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let width = fields.keys().map(String::len).max().unwrap_or(0);

    for (key, value) in fields {
        match value {
            Value::Object(nested) => {
                writeln!(out, "{indent}{key}:")?;
                write_object(out, nested, depth + 1)?;
            }
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                writeln!(out, "{indent}{key}:")?;
                write_rows(out, items, depth + 1)?;
            }
            Value::Array(items) => {
                let joined = items.iter().map(scalar).collect::<Vec<_>>().join(", ");
                writeln!(out, "{indent}{key:<width$} : [{joined}]")?;
            }
            other => writeln!(out, "{indent}{key:<width$} : {}", scalar(other))?,
        }
    }
    Ok(())
}

/// Column-aligned rows; columns come from the first row's keys.
fn write_rows<W: Write>(out: &mut W, rows: &[Value], depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let columns = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();

    let cells = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.get(column).map(scalar).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let widths = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column, *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{indent}{}", header.trim_end())?;

    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{indent}{}", line.trim_end())?;
    }
    Ok(())
}

// Counts chars, not bytes, so `₹` pads like any other glyph.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(fill))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rupeetick_core::{EnvelopeMeta, SeriesOrigin};
    use serde_json::json;

    use super::*;

    fn envelope(data: Value) -> Envelope<Value> {
        let mut meta = EnvelopeMeta::new("request-12345", 83.25, 3)
            .expect("valid meta")
            .with_origin(SeriesOrigin::Simulated);
        meta.push_warning("live data unavailable");
        Envelope::new(meta, data).expect("valid envelope")
    }

    fn render_to_string(envelope: &Envelope<Value>) -> String {
        let mut buffer = Vec::new();
        write_table(&mut buffer, envelope).expect("writes to memory");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn table_lists_meta_and_warnings() {
        let text = render_to_string(&envelope(json!({ "symbol": "AAPL" })));

        assert!(text.contains("origin      : simulated"));
        assert!(text.contains("usd_inr     : 83.25"));
        assert!(text.contains("  - live data unavailable"));
        assert!(text.contains("symbol : AAPL"));
    }

    #[test]
    fn arrays_of_objects_become_aligned_columns() {
        let text = render_to_string(&envelope(json!({
            "points": [
                { "date": "2024-03-01", "price": 14568.75 },
                { "date": "2024-03-02", "price": 9.5 },
            ]
        })));

        let lines = text
            .lines()
            .skip_while(|line| !line.starts_with("points:"))
            .collect::<Vec<_>>();
        assert_eq!(lines[1], "  date        price");
        assert_eq!(lines[2], "  2024-03-01  14568.75");
        assert_eq!(lines[3], "  2024-03-02  9.5");
    }

    #[test]
    fn rupee_cells_pad_by_character() {
        assert_eq!(pad("₹5.00 Cr", 10), "₹5.00 Cr  ");
    }
}

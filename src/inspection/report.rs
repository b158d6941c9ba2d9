//! The full inspection run: schema first, then every record batch in file order.

use std::{collections::BTreeMap, io::Write, path::Path};

use arrow::{
    array::RecordBatch,
    datatypes::SchemaRef,
    error::ArrowError,
    json::{WriterBuilder, writer::JsonArray},
};
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Value, json};

use super::{
    container::ContainerHandle,
    render::{RenderOptions, render_with},
    style::{dim, error, header, label, value},
};
use crate::error::{InspectError, Result};

const MAX_METADATA_DISPLAY_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    /// Include schema and footer key/value metadata.
    pub show_metadata: bool,
    pub render: RenderOptions,
}

/// Counts from a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub batches: usize,
    pub rendered: usize,
    pub failed: usize,
}

/// Open `path` and write its schema and batches to `out`.
///
/// Errors opening the file are returned before anything is written. Errors
/// reading or rendering a single batch are reported inline and counted in
/// [`ReportSummary::failed`].
pub fn inspect(
    path: &Path,
    out: &mut dyn Write,
    options: &ReportOptions,
) -> Result<ReportSummary> {
    let mut handle = ContainerHandle::open(path)?;

    let summary = match options.format {
        ReportFormat::Text => write_text(&mut handle, out, options)?,
        ReportFormat::Json => write_json(&mut handle, out, options)?,
    };

    handle.close();
    debug!(
        "inspected {}: {} batches, {} failed",
        path.display(),
        summary.batches,
        summary.failed
    );
    Ok(summary)
}

fn write_text(
    handle: &mut ContainerHandle,
    out: &mut dyn Write,
    options: &ReportOptions,
) -> Result<ReportSummary> {
    writeln!(
        out,
        "{} {}",
        header(handle.path().display()),
        dim("(Arrow IPC file)")
    )?;
    writeln!(out)?;

    render_schema(&handle.schema(), out)?;

    if options.show_metadata {
        render_metadata(handle, out)?;
    }

    let mut summary = ReportSummary {
        batches: handle.batch_count(),
        ..Default::default()
    };

    if summary.batches == 0 {
        writeln!(out, "\n{}", dim("(no record batches)"))?;
    }

    for index in 0..summary.batches {
        writeln!(out)?;
        match read_and_render(handle, index, &options.render) {
            Ok((num_rows, table)) => {
                writeln!(
                    out,
                    "{} {} ({}):",
                    header("Batch"),
                    value(index),
                    rows_label(num_rows)
                )?;
                writeln!(out, "{table}")?;
                summary.rendered += 1;
            }
            Err(e) if e.is_recoverable() => {
                warn!("skipping batch {index}: {e}");
                writeln!(
                    out,
                    "{} {}: {}",
                    header("Batch"),
                    value(index),
                    error(format!("<error: {e}>"))
                )?;
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

fn read_and_render(
    handle: &mut ContainerHandle,
    index: usize,
    options: &RenderOptions,
) -> Result<(usize, String)> {
    let batch = handle.get_batch(index)?;
    let table = render_with(&batch, options)?;
    Ok((batch.num_rows(), table))
}

fn rows_label(num_rows: usize) -> String {
    if num_rows == 1 {
        "1 row".to_string()
    } else {
        format!("{num_rows} rows")
    }
}

/// Render schema fields, one `name: type` line per field in declared order.
pub fn render_schema(schema: &SchemaRef, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} ({} fields):",
        header("Schema"),
        value(schema.fields().len())
    )?;

    for field in schema.fields() {
        let nullable = if field.is_nullable() {
            format!(" {}", dim("(nullable)"))
        } else {
            String::new()
        };
        writeln!(
            out,
            "  {}: {}{}",
            label(field.name()),
            field.data_type(),
            nullable
        )?;
    }

    Ok(())
}

fn render_metadata(handle: &ContainerHandle, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n{}:", header("Custom Metadata"))?;
    let metadata: BTreeMap<_, _> = handle.custom_metadata().iter().collect();
    if metadata.is_empty() {
        writeln!(out, "  {}", dim("(none)"))?;
    } else {
        for (k, v) in metadata {
            writeln!(out, "  {}: {}", label(k), truncate_for_display(v))?;
        }
    }
    Ok(())
}

/// Truncate a string for display, adding char count if truncated.
fn truncate_for_display(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > MAX_METADATA_DISPLAY_CHARS {
        let truncated: String = value.chars().take(MAX_METADATA_DISPLAY_CHARS).collect();
        format!("{}... ({} chars total)", truncated, char_count)
    } else {
        value.to_string()
    }
}

/// Schema info for JSON serialization.
#[derive(Serialize)]
struct SchemaField {
    name: String,
    data_type: String,
    nullable: bool,
}

fn schema_to_json(schema: &SchemaRef) -> Vec<SchemaField> {
    schema
        .fields()
        .iter()
        .map(|f| SchemaField {
            name: f.name().clone(),
            data_type: format!("{}", f.data_type()),
            nullable: f.is_nullable(),
        })
        .collect()
}

fn write_json(
    handle: &mut ContainerHandle,
    out: &mut dyn Write,
    options: &ReportOptions,
) -> Result<ReportSummary> {
    let mut summary = ReportSummary {
        batches: handle.batch_count(),
        ..Default::default()
    };

    let mut batches = Vec::with_capacity(summary.batches);
    for index in 0..summary.batches {
        let rows = handle
            .get_batch(index)
            .and_then(|batch| Ok((batch.num_rows(), rows_to_json(&batch)?)));
        match rows {
            Ok((num_rows, rows)) => {
                batches.push(json!({ "index": index, "num_rows": num_rows, "rows": rows }));
                summary.rendered += 1;
            }
            Err(e) if e.is_recoverable() => {
                warn!("skipping batch {index}: {e}");
                batches.push(json!({ "index": index, "error": e.to_string() }));
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let metadata = if options.show_metadata {
        json!(handle.custom_metadata())
    } else {
        Value::Null
    };

    let report = json!({
        "file": handle.path().display().to_string(),
        "format": "arrow",
        "schema": schema_to_json(&handle.schema()),
        "metadata": metadata,
        "record_batches": summary.batches,
        "batches": batches,
    });

    writeln!(
        out,
        "{}",
        serde_json::to_string(&report).map_err(std::io::Error::from)?
    )?;
    Ok(summary)
}

/// Convert a batch into a JSON array of row objects with explicit nulls.
fn rows_to_json(batch: &RecordBatch) -> Result<Value> {
    if batch.num_rows() == 0 {
        return Ok(Value::Array(vec![]));
    }

    encode_json(batch).map_err(|source| {
        // find the column the encoder choked on so the error names it
        let schema = batch.schema();
        let failing = (0..batch.num_columns())
            .find(|&i| batch.project(&[i]).map_or(true, |b| encode_json(&b).is_err()))
            .unwrap_or(0);
        match schema.fields().get(failing) {
            Some(field) => InspectError::Render {
                column: field.name().clone(),
                data_type: field.data_type().clone(),
                reason: source.to_string(),
            },
            None => InspectError::Io(std::io::Error::other(source)),
        }
    })
}

fn encode_json(batch: &RecordBatch) -> std::result::Result<Value, ArrowError> {
    let mut writer = WriterBuilder::new()
        .with_explicit_nulls(true)
        .build::<_, JsonArray>(Vec::new());
    writer.write(batch)?;
    writer.finish()?;
    serde_json::from_slice(&writer.into_inner()).map_err(|e| ArrowError::JsonError(e.to_string()))
}

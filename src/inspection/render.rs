//! Text table rendering for record batches.

use arrow::{
    array::RecordBatch,
    datatypes::Field,
    error::ArrowError,
    util::display::{ArrayFormatter, FormatOptions},
};
use tabled::builder::Builder;

use super::style::rounded_table;
use crate::error::{InspectError, Result};

pub const NULL_PLACEHOLDER: &str = "<null>";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Text shown in place of a null cell.
    pub null_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            null_placeholder: NULL_PLACEHOLDER.to_string(),
        }
    }
}

/// Render a batch as a table using the default options.
pub fn render(batch: &RecordBatch) -> Result<String> {
    render_with(batch, &RenderOptions::default())
}

/// Render a batch as a table with one header row of field names followed by
/// one row per record, in batch order. A batch with no rows renders as the
/// header alone.
pub fn render_with(batch: &RecordBatch, options: &RenderOptions) -> Result<String> {
    let schema = batch.schema();
    let format_options = FormatOptions::default()
        .with_null(&options.null_placeholder)
        .with_display_error(false);

    let formatters = batch
        .columns()
        .iter()
        .zip(schema.fields())
        .map(|(column, field)| {
            ArrayFormatter::try_new(column.as_ref(), &format_options)
                .map_err(|e| render_error(field, e))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = Builder::default();
    builder.push_record(schema.fields().iter().map(|f| f.name().clone()));

    for row in 0..batch.num_rows() {
        let record = formatters
            .iter()
            .zip(schema.fields())
            .map(|(formatter, field)| {
                formatter
                    .value(row)
                    .try_to_string()
                    .map_err(|e| render_error(field, e))
            })
            .collect::<Result<Vec<_>>>()?;
        builder.push_record(record);
    }

    Ok(rounded_table(builder).to_string())
}

fn render_error(field: &Field, source: ArrowError) -> InspectError {
    InspectError::Render {
        column: field.name().clone(),
        data_type: field.data_type().clone(),
        reason: source.to_string(),
    }
}

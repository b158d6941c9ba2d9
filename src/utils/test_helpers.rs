pub mod test_data {
    use std::{collections::HashMap, sync::Arc};

    use arrow::{
        array::{Array, Int64Array, RecordBatch, StringArray, TimestampSecondArray},
        datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit},
    };

    pub fn sample_schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("value", DataType::Utf8, true),
        ]))
    }

    pub fn sample_schema_with_metadata(metadata: &[(&str, &str)]) -> SchemaRef {
        let metadata: HashMap<String, String> = metadata
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Arc::new(Schema::new(sample_schema().fields().clone()).with_metadata(metadata))
    }

    pub fn create_sample_batch(
        schema: &SchemaRef,
        ids: &[i64],
        values: &[Option<&str>],
    ) -> RecordBatch {
        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(Int64Array::from(ids.to_vec())),
                Arc::new(StringArray::from(values.to_vec())),
            ],
        )
        .unwrap()
    }

    /// A single-column batch of second timestamps named `c`.
    pub fn timestamp_batch(tz: Option<&str>, values: &[Option<i64>]) -> RecordBatch {
        let array = TimestampSecondArray::from(values.to_vec()).with_timezone_opt(tz);
        let schema = Arc::new(Schema::new(vec![Field::new(
            "c",
            array.data_type().clone(),
            true,
        )]));
        RecordBatch::try_new(schema, vec![Arc::new(array)]).unwrap()
    }

    pub fn timestamp_type(tz: Option<&str>) -> DataType {
        DataType::Timestamp(TimeUnit::Second, tz.map(Into::into))
    }

    pub fn ids(batch: &RecordBatch) -> Vec<i64> {
        let array = batch
            .column_by_name("id")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        (0..array.len()).map(|i| array.value(i)).collect()
    }
}

pub mod file_helpers {
    use anyhow::Result;
    use arrow::{
        array::RecordBatch,
        datatypes::SchemaRef,
        ipc::writer::{FileWriter, StreamWriter},
    };
    use std::{fs::File, path::Path};

    use super::test_data;

    pub fn write_arrow_file(
        path: &Path,
        schema: &SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = FileWriter::try_new(file, schema)?;
        for batch in batches {
            writer.write(&batch)?;
        }
        writer.finish()?;
        Ok(())
    }

    pub fn write_arrow_stream(
        path: &Path,
        schema: &SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = StreamWriter::try_new(file, schema)?;
        for batch in batches {
            writer.write(&batch)?;
        }
        writer.finish()?;
        Ok(())
    }

    /// Two batches: `(1, "a"), (2, "b")` then `(3, null)`.
    pub fn write_sample_file(path: &Path) -> Result<()> {
        let schema = test_data::sample_schema();
        let first = test_data::create_sample_batch(&schema, &[1, 2], &[Some("a"), Some("b")]);
        let second = test_data::create_sample_batch(&schema, &[3], &[None]);
        write_arrow_file(path, &schema, vec![first, second])
    }

    pub fn write_invalid_file(path: &Path) -> Result<()> {
        std::fs::write(path, b"not an arrow file")?;
        Ok(())
    }
}

/// Byte-level damage to otherwise valid Arrow IPC files.
pub mod corrupt {
    use arrow::ipc::{reader::read_footer_length, root_as_footer};
    use std::path::Path;

    // trailing footer length (4 bytes) plus the ARROW1 magic
    const TRAILER_LEN: usize = 10;

    /// `(offset, metadata length)` of every record batch block in the footer.
    pub fn footer_blocks(path: &Path) -> Vec<(usize, usize)> {
        let bytes = std::fs::read(path).unwrap();
        let trailer_start = bytes.len() - TRAILER_LEN;
        let trailer: [u8; TRAILER_LEN] = bytes[trailer_start..].try_into().unwrap();
        let footer_len = read_footer_length(trailer).unwrap();

        let footer = root_as_footer(&bytes[trailer_start - footer_len..trailer_start]).unwrap();
        footer
            .recordBatches()
            .unwrap()
            .iter()
            .map(|block| {
                (
                    usize::try_from(block.offset()).unwrap(),
                    usize::try_from(block.metaDataLength()).unwrap(),
                )
            })
            .collect()
    }

    pub fn truncate_tail(path: &Path, n: usize) {
        let bytes = std::fs::read(path).unwrap();
        std::fs::write(path, &bytes[..bytes.len() - n]).unwrap();
    }

    pub fn overwrite_footer_length(path: &Path, footer_len: i32) {
        let mut bytes = std::fs::read(path).unwrap();
        let start = bytes.len() - TRAILER_LEN;
        bytes[start..start + 4].copy_from_slice(&footer_len.to_le_bytes());
        std::fs::write(path, bytes).unwrap();
    }

    /// Overwrite the flatbuffer of one batch's message, keeping its length prefix.
    pub fn garble_batch_message(path: &Path, index: usize) {
        let (offset, metadata_len) = footer_blocks(path)[index];
        let mut bytes = std::fs::read(path).unwrap();
        bytes[offset + 8..offset + metadata_len].fill(0xAB);
        std::fs::write(path, bytes).unwrap();
    }
}

//! Read-only access to a single Arrow IPC file.

use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use arrow::{array::RecordBatch, datatypes::SchemaRef, error::ArrowError, ipc::reader::FileReader};
use log::debug;

use super::magic::has_arrow_magic;
use crate::error::{InspectError, Result};

/// An open Arrow IPC file.
///
/// The schema and batch count are read from the footer on open and stay
/// available after [`ContainerHandle::close`]. Dropping the handle closes it.
pub struct ContainerHandle {
    path: PathBuf,
    schema: SchemaRef,
    num_batches: usize,
    custom_metadata: HashMap<String, String>,
    reader: Option<FileReader<BufReader<File>>>,
}

impl ContainerHandle {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|error| InspectError::NotFound {
            path: path.to_path_buf(),
            error,
        })?;

        let metadata = file.metadata().map_err(|error| InspectError::NotFound {
            path: path.to_path_buf(),
            error,
        })?;
        if !metadata.is_file() {
            return Err(InspectError::NotFound {
                path: path.to_path_buf(),
                error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "not a regular file",
                ),
            });
        }

        let format_err = |reason: String| InspectError::Format {
            path: path.to_path_buf(),
            reason,
        };

        match has_arrow_magic(&mut file)? {
            (true, true) => {}
            (false, _) => return Err(format_err("missing ARROW1 magic at start of file".into())),
            (true, false) => return Err(format_err("missing ARROW1 magic at end of file".into())),
        }

        let reader =
            FileReader::try_new_buffered(file, None).map_err(|e| format_err(e.to_string()))?;

        let schema = reader.schema();
        let num_batches = reader.num_batches();
        let mut custom_metadata = schema.metadata().clone();
        custom_metadata.extend(reader.custom_metadata().clone());

        debug!(
            "opened {} ({} fields, {} batches)",
            path.display(),
            schema.fields().len(),
            num_batches
        );

        Ok(Self {
            path: path.to_path_buf(),
            schema,
            num_batches,
            custom_metadata,
            reader: Some(reader),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn batch_count(&self) -> usize {
        self.num_batches
    }

    /// Custom key/value metadata from the schema and the footer.
    pub fn custom_metadata(&self) -> &HashMap<String, String> {
        &self.custom_metadata
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    /// Read the batch at `index` (zero-based, footer order).
    pub fn get_batch(&mut self, index: usize) -> Result<RecordBatch> {
        if index >= self.num_batches {
            return Err(InspectError::Index {
                index,
                count: self.num_batches,
            });
        }

        let reader = self.reader.as_mut().ok_or(InspectError::Closed)?;
        reader
            .set_index(index)
            .map_err(|error| InspectError::Decode { index, error })?;

        debug!("reading batch {index} of {}", self.path.display());

        match reader.next() {
            Some(Ok(batch)) => Ok(batch),
            Some(Err(error)) => Err(InspectError::Decode { index, error }),
            None => Err(InspectError::Decode {
                index,
                error: ArrowError::IpcError(format!("no record batch at block {index}")),
            }),
        }
    }

    /// Release the underlying file. Calling this more than once does nothing.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!("closed {}", self.path.display());
        }
    }
}

impl Drop for ContainerHandle {
    fn drop(&mut self) {
        self.close();
    }
}

use std::fs::File;
use std::io::{Read, Result, Seek, SeekFrom};

/// Magic bytes at the head and tail of an Arrow IPC file.
pub const ARROW_MAGIC: &[u8; 6] = b"ARROW1";

/// Check for `ARROW1` at the head and at the tail of `file`.
///
/// Returns `(head, tail)`. The read position is left where it was.
pub fn has_arrow_magic(file: &mut File) -> Result<(bool, bool)> {
    let len = file.metadata()?.len();
    // the head and tail magic may not overlap
    if len < 2 * ARROW_MAGIC.len() as u64 {
        return Ok((false, false));
    }

    let resume_at = file.stream_position()?;
    let mut head = [0u8; ARROW_MAGIC.len()];
    let mut tail = [0u8; ARROW_MAGIC.len()];

    file.seek(SeekFrom::Start(0))?;
    file.read_exact(&mut head)?;
    file.seek(SeekFrom::Start(len - ARROW_MAGIC.len() as u64))?;
    file.read_exact(&mut tail)?;
    file.seek(SeekFrom::Start(resume_at))?;

    Ok((&head == ARROW_MAGIC, &tail == ARROW_MAGIC))
}

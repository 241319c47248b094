//! src/codec/write.rs
//! Reserve-then-backfill writers for the container fields.

use crate::error::EncryptorError;
use std::io::{Seek, SeekFrom, Write};

/// Write raw bytes at the current position.
#[inline]
pub fn write_field<W: Write>(writer: &mut W, data: &[u8]) -> Result<(), EncryptorError> {
    writer.write_all(data).map_err(EncryptorError::Io)
}

/// Write `len` zero bytes and return the absolute offset where they start.
#[inline]
pub fn reserve<W: Write + Seek>(writer: &mut W, len: usize) -> Result<u64, EncryptorError> {
    let offset = writer.stream_position()?;
    write_field(writer, &vec![0u8; len])?;
    tracing::trace!(offset, len, "reserved container field");
    Ok(offset)
}

/// Overwrite previously reserved bytes at `offset`, then restore the position.
///
/// Only `data.len()` bytes are touched; surrounding content is left as is.
pub fn backfill<W: Write + Seek>(
    writer: &mut W,
    offset: u64,
    data: &[u8],
) -> Result<(), EncryptorError> {
    let position = writer.stream_position()?;
    writer.seek(SeekFrom::Start(offset))?;
    write_field(writer, data)?;
    writer.seek(SeekFrom::Start(position))?;
    tracing::trace!(offset, len = data.len(), "backfilled container field");
    Ok(())
}

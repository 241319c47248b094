//! src/codec/read.rs
//! Sequential field extraction from a container source.

use crate::error::EncryptorError;
use std::io::Read;

/// Consume exactly `len` bytes.
///
/// # Errors
///
/// [`EncryptorError::TruncatedInput`] if the source ends first.
pub fn read_field<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, EncryptorError> {
    let mut field = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut field)?;
    if field.len() < len {
        return Err(EncryptorError::TruncatedInput {
            expected: len,
            actual: field.len(),
        });
    }
    Ok(field)
}

/// Read exactly `N` bytes into a stack-allocated `[u8; N]`.
#[inline(always)]
pub fn read_exact_span<R, const N: usize>(reader: &mut R) -> Result<[u8; N], EncryptorError>
where
    R: Read,
{
    let field = read_field(reader, N)?;
    let mut buf = [0u8; N];
    buf.copy_from_slice(&field);
    Ok(buf)
}

/// Read up to `buf.len()` bytes; `0` means end of input.
pub(crate) fn read_chunk<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<usize, EncryptorError> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(EncryptorError::Io(e)),
        }
    }
}

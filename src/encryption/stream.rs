//! src/encryption/stream.rs
//! Chunked plaintext → ciphertext streaming, and MAC over a written region.

use crate::codec::read_chunk;
use crate::consts::AES_BLOCK_SIZE;
use crate::crypto::cipher::CipherStream;
use crate::crypto::mac::MacAlgorithm;
use crate::error::EncryptorError;
use std::io::{Read, Seek, SeekFrom, Write};

/// Encrypt `chunk[..first]` followed by the rest of `source` into
/// `destination`. `chunk` doubles as the read buffer.
///
/// Returns the number of plaintext bytes consumed.
pub(crate) fn encrypt_payload<R, W>(
    source: &mut R,
    destination: &mut W,
    mut cipher: CipherStream,
    chunk: &mut [u8],
    first: usize,
) -> Result<u64, EncryptorError>
where
    R: Read,
    W: Write,
{
    let mut ciphertext = Vec::with_capacity(chunk.len() + AES_BLOCK_SIZE);
    let mut plaintext_len = 0u64;
    let mut n = first;

    while n > 0 {
        plaintext_len += n as u64;
        cipher.update(&chunk[..n], &mut ciphertext);
        destination.write_all(&ciphertext)?;
        ciphertext.clear();
        n = read_chunk(source, chunk)?;
    }

    cipher.finalize(&mut ciphertext)?;
    destination.write_all(&ciphertext)?;
    Ok(plaintext_len)
}

/// Feed everything from `offset` to the end of `sink` into `mac`.
///
/// Leaves `sink` positioned at its end.
pub(crate) fn mac_region<M, S>(
    sink: &mut S,
    offset: u64,
    mac: &mut M,
    buffer_size: usize,
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    S: Read + Seek,
{
    sink.seek(SeekFrom::Start(offset))?;
    let mut chunk = vec![0u8; buffer_size];
    loop {
        let n = read_chunk(sink, &mut chunk)?;
        if n == 0 {
            return Ok(());
        }
        mac.update(&chunk[..n]);
    }
}

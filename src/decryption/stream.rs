//! src/decryption/stream.rs
//! Chunked ciphertext → plaintext streaming, bounded by the stored length.

use crate::aliases::SecretBytes;
use crate::config::PaddingMode;
use crate::consts::AES_BLOCK_SIZE;
use crate::crypto::cipher::CipherStream;
use crate::error::EncryptorError;
use std::io::Write;

/// Decrypt `ciphertext` in `buffer_size` chunks into `destination`.
///
/// At most `plaintext_len` bytes are written. With [`PaddingMode::Zeros`] the
/// cipher output is simply cut there; every other padding mode must yield
/// exactly `plaintext_len` bytes.
pub(crate) fn decrypt_payload<W: Write>(
    ciphertext: &[u8],
    destination: &mut W,
    mut cipher: CipherStream,
    buffer_size: usize,
    plaintext_len: u64,
    padding: PaddingMode,
) -> Result<(), EncryptorError> {
    let mut plaintext = SecretBytes::new(Vec::with_capacity(buffer_size + AES_BLOCK_SIZE));
    let mut produced = 0u64;
    let mut written = 0u64;

    for chunk in ciphertext.chunks(buffer_size) {
        cipher.update(chunk, plaintext.expose_secret_mut());
        produced += plaintext.expose_secret().len() as u64;
        written += emit(destination, plaintext.expose_secret_mut(), plaintext_len - written)?;
    }

    cipher.finalize(plaintext.expose_secret_mut())?;
    produced += plaintext.expose_secret().len() as u64;
    written += emit(destination, plaintext.expose_secret_mut(), plaintext_len - written)?;
    destination.flush()?;

    let consistent = match padding {
        PaddingMode::Zeros => written == plaintext_len,
        _ => produced == plaintext_len,
    };
    if !consistent {
        return Err(EncryptorError::Cipher(format!(
            "decrypted {produced} bytes but the container declares {plaintext_len}"
        )));
    }
    Ok(())
}

/// Write up to `budget` bytes of `buf`, then wipe and clear it.
fn emit<W: Write>(
    destination: &mut W,
    buf: &mut Vec<u8>,
    budget: u64,
) -> Result<u64, EncryptorError> {
    let take = buf.len().min(usize::try_from(budget).unwrap_or(usize::MAX));
    destination.write_all(&buf[..take])?;
    buf.fill(0);
    buf.clear();
    Ok(take as u64)
}

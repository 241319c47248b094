//! src/encryption/encrypt.rs
//! Container construction: salts, key derivation, field reservation, MAC.

use crate::aliases::{PasswordString, SecretBytes};
use crate::codec::{backfill, read_chunk, reserve, write_field, ContainerLayout};
use crate::config::EncryptorConfiguration;
use crate::consts::LENGTH_FIELD_SIZE;
use crate::crypto::cipher::{CipherStream, Direction};
use crate::crypto::kdf::derive_key;
use crate::crypto::mac::MacAlgorithm;
use crate::crypto::rng::generate_random;
use crate::encryption::stream::{encrypt_payload, mac_region};
use crate::error::EncryptorError;
use std::io::{Read, Seek, SeekFrom, Write};

/// Encrypt `input` into a new container written to `output`.
///
/// The container starts at the current position of `output`; on success
/// `output` is left positioned at that start. `output` must be readable and
/// seekable because the MAC is computed over the bytes already written.
///
/// # Errors
///
/// - [`EncryptorError::InvalidInput`] if `input` is empty, the password is empty,
///   or `output` already holds bytes past its current position
/// - [`EncryptorError::InvalidConfiguration`] if `config` is invalid
/// - [`EncryptorError::Encryption`] wrapping any other failure
///
/// # Example
///
/// ```
/// use streamcrypt::{encrypt_stream, EncryptorConfiguration, HmacSha256, PasswordString};
/// use std::io::Cursor;
///
/// let password = PasswordString::new("password".to_string());
/// let mut container = Cursor::new(Vec::new());
/// encrypt_stream::<HmacSha256, _, _>(
///     &mut &[80u8, 64, 1, 25, 97, 123, 0, 255][..],
///     &mut container,
///     &password,
///     &EncryptorConfiguration::default(),
/// )?;
/// assert_eq!(container.get_ref().len(), 104);
/// # Ok::<(), streamcrypt::EncryptorError>(())
/// ```
pub fn encrypt_stream<M, R, W>(
    input: &mut R,
    output: &mut W,
    password: &PasswordString,
    config: &EncryptorConfiguration,
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    R: Read,
    W: Read + Write + Seek,
{
    if password.expose_secret().is_empty() {
        return Err(EncryptorError::InvalidInput(
            "password may not be empty".into(),
        ));
    }
    if !config.is_valid() {
        return Err(EncryptorError::InvalidConfiguration(format!(
            "sizes must be positive: {config:?}"
        )));
    }

    // the MAC runs to the end of the sink, so nothing may follow the container
    let start = output
        .stream_position()
        .map_err(|e| EncryptorError::Io(e).into_encryption())?;
    let end = output
        .seek(SeekFrom::End(0))
        .and_then(|end| output.seek(SeekFrom::Start(start)).map(|_| end))
        .map_err(|e| EncryptorError::Io(e).into_encryption())?;
    if end > start {
        return Err(EncryptorError::InvalidInput(format!(
            "sink holds {} bytes past the container start",
            end - start
        )));
    }

    let mut chunk = SecretBytes::new(vec![0u8; config.buffer_size()]);
    let first = read_chunk(input, chunk.expose_secret_mut())
        .map_err(EncryptorError::into_encryption)?;
    if first == 0 {
        return Err(EncryptorError::InvalidInput(
            "input stream may not be empty".into(),
        ));
    }

    write_container::<M, _, _>(input, output, password, config, &mut chunk, first)
        .map_err(EncryptorError::into_encryption)
}

fn write_container<M, R, W>(
    input: &mut R,
    output: &mut W,
    password: &PasswordString,
    config: &EncryptorConfiguration,
    chunk: &mut SecretBytes,
    first: usize,
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    R: Read,
    W: Read + Write + Seek,
{
    let layout = ContainerLayout::new(M::tag_size(), config.salt_size());

    // Encryption key + IV
    let key_salt = generate_random(layout.salt_size())?;
    let key = derive_key(password, key_salt.expose_secret(), config.key_size())?;
    let iv = generate_random(layout.iv_size())?;

    // MAC, auth salt and length are only known at the end
    let start = reserve(output, layout.tag_size())?;
    reserve(output, layout.salt_size())?;
    let length_offset = reserve(output, LENGTH_FIELD_SIZE)?;
    write_field(output, key_salt.expose_secret())?;
    write_field(output, iv.expose_secret())?;

    let cipher = CipherStream::new(
        Direction::Encrypt,
        key.expose_secret(),
        iv.expose_secret(),
        config.cipher_mode(),
        config.padding_mode(),
    )?;
    let plaintext_len = encrypt_payload(input, output, cipher, chunk.expose_secret_mut(), first)?;
    backfill(output, length_offset, &plaintext_len.to_le_bytes())?;

    // Encrypt-then-MAC over length field .. end
    let auth_salt = generate_random(layout.salt_size())?;
    let mac_key = derive_key(password, auth_salt.expose_secret(), M::KEY_SIZE)?;
    let mut mac = M::keyed(mac_key.expose_secret())?;
    mac_region(output, length_offset, &mut mac, config.buffer_size())?;
    let tag = mac.finalize().into_bytes();

    backfill(output, start, tag.as_slice())?;
    backfill(
        output,
        start + layout.auth_salt_offset() as u64,
        auth_salt.expose_secret(),
    )?;

    let end = output.stream_position()?;
    output.seek(SeekFrom::Start(start))?;
    output.flush()?;

    tracing::debug!(
        mac = M::NAME,
        plaintext_len,
        container_len = end - start,
        "encrypted stream"
    );
    Ok(())
}

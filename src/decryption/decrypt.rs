//! src/decryption/decrypt.rs
//! Authenticate, parse the covered fields, then decrypt.

use crate::aliases::PasswordString;
use crate::authentication::{authenticate, AuthenticationResult};
use crate::codec::{read_exact_span, read_field};
use crate::config::EncryptorConfiguration;
use crate::consts::{AES_BLOCK_SIZE, LENGTH_FIELD_SIZE};
use crate::crypto::cipher::{CipherStream, Direction};
use crate::crypto::kdf::derive_key;
use crate::crypto::mac::MacAlgorithm;
use crate::decryption::stream::decrypt_payload;
use crate::error::EncryptorError;
use std::io::{Read, Seek, SeekFrom, Write};

/// Verify and decrypt the container at the current position of `container`,
/// writing plaintext to `output`.
///
/// # Errors
///
/// - [`EncryptorError::InvalidInput`] if the container is empty or the password is empty
/// - [`EncryptorError::InvalidConfiguration`] if `config` is invalid
/// - [`EncryptorError::TamperedData`] if the MAC does not verify (wrong password included)
/// - [`EncryptorError::Decryption`] wrapping any failure after authentication
pub fn decrypt_stream<M, R, W>(
    container: &mut R,
    output: &mut W,
    password: &PasswordString,
    config: &EncryptorConfiguration,
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    R: Read + Seek,
    W: Write,
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

    let auth = authenticate::<M, _>(
        container,
        password,
        config.salt_size(),
        config.buffer_size(),
        false,
    )
    .map_err(EncryptorError::into_decryption)?;
    decrypt_authenticated(container, auth, output, password, config)
}

/// Second half of decryption, fed by a consuming authentication of `container`.
pub(crate) fn decrypt_authenticated<R, W>(
    container: &mut R,
    auth: AuthenticationResult,
    output: &mut W,
    password: &PasswordString,
    config: &EncryptorConfiguration,
) -> Result<(), EncryptorError>
where
    R: Seek,
    W: Write,
{
    if !auth.success() {
        tracing::warn!("container failed authentication; refusing to decrypt");
        return Err(EncryptorError::TamperedData);
    }

    let body = auth.into_remaining().unwrap_or_default();
    decrypt_body(&body, output, password, config)
        .and_then(|()| {
            // the covered region was read in full during authentication
            container.seek(SeekFrom::Current(body.len() as i64))?;
            Ok(())
        })
        .map_err(EncryptorError::into_decryption)
}

fn decrypt_body<W: Write>(
    body: &[u8],
    output: &mut W,
    password: &PasswordString,
    config: &EncryptorConfiguration,
) -> Result<(), EncryptorError> {
    let mut fields = body;
    let length: [u8; LENGTH_FIELD_SIZE] = read_exact_span(&mut fields)?;
    let plaintext_len = u64::from_le_bytes(length);
    let key_salt = read_field(&mut fields, config.salt_size())?;
    let iv = read_field(&mut fields, AES_BLOCK_SIZE)?;
    let ciphertext = fields;

    if plaintext_len > ciphertext.len() as u64 {
        return Err(EncryptorError::Cipher(format!(
            "declared plaintext length {plaintext_len} exceeds ciphertext length {}",
            ciphertext.len()
        )));
    }

    let key = derive_key(password, &key_salt, config.key_size())?;
    let cipher = CipherStream::new(
        Direction::Decrypt,
        key.expose_secret(),
        &iv,
        config.cipher_mode(),
        config.padding_mode(),
    )?;

    decrypt_payload(
        ciphertext,
        output,
        cipher,
        config.buffer_size(),
        plaintext_len,
        config.padding_mode(),
    )?;

    tracing::debug!(
        plaintext_len,
        ciphertext_len = ciphertext.len(),
        "decrypted stream"
    );
    Ok(())
}

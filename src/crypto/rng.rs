// src/crypto/rng.rs
//! Secure randomness for salts, IVs and ISO 10126 padding, drawn from `OsRng`.

use crate::aliases::SecretBytes;
use crate::error::EncryptorError;
use rand::{rngs::OsRng, TryRngCore};

/// Generate `size` cryptographically secure random bytes.
///
/// # Errors
///
/// - [`EncryptorError::InvalidInput`] if `size == 0`
/// - [`EncryptorError::GenerateIv`] if the OS source fails
pub fn generate_random(size: usize) -> Result<SecretBytes, EncryptorError> {
    if size == 0 {
        return Err(EncryptorError::InvalidInput(
            "random size must be positive".into(),
        ));
    }

    let mut bytes = SecretBytes::new(vec![0u8; size]);
    fill_random(bytes.expose_secret_mut())?;
    Ok(bytes)
}

/// Fill `dest` from the OS source.
pub(crate) fn fill_random(dest: &mut [u8]) -> Result<(), EncryptorError> {
    let mut rng = OsRng;
    rng.try_fill_bytes(dest)
        .map_err(|e| EncryptorError::GenerateIv(format!("OS RNG failed: {e}")))
}

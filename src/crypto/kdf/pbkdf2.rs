//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{HmacSha512, PasswordString, SecretBytes};
use crate::consts::PBKDF2_ITERATIONS;
use crate::error::EncryptorError;

use ::pbkdf2::pbkdf2;

/// Derive `key_size` bytes from `password` and `salt` with PBKDF2-HMAC-SHA512.
///
/// Deterministic: equal inputs always give equal output. The iteration count
/// is [`PBKDF2_ITERATIONS`].
///
/// # Errors
///
/// - [`EncryptorError::InvalidInput`] if the password or salt is empty, or `key_size == 0`
/// - [`EncryptorError::DeriveKey`] if the PRF rejects its parameters
///
/// # Example
///
/// ```
/// use streamcrypt::{derive_key, PasswordString};
///
/// let password = PasswordString::new("password".to_string());
/// let a = derive_key(&password, &[1, 2, 3, 4, 5, 6, 7, 8], 32)?;
/// let b = derive_key(&password, &[1, 2, 3, 4, 5, 6, 7, 8], 32)?;
/// assert_eq!(a.expose_secret(), b.expose_secret());
/// assert_eq!(a.expose_secret().len(), 32);
/// # Ok::<(), streamcrypt::EncryptorError>(())
/// ```
pub fn derive_key(
    password: &PasswordString,
    salt: &[u8],
    key_size: usize,
) -> Result<SecretBytes, EncryptorError> {
    if password.expose_secret().is_empty() {
        return Err(EncryptorError::InvalidInput(
            "password may not be empty".into(),
        ));
    }
    if salt.is_empty() {
        return Err(EncryptorError::InvalidInput("salt may not be empty".into()));
    }
    if key_size == 0 {
        return Err(EncryptorError::InvalidInput(
            "key size must be positive".into(),
        ));
    }

    let mut key = SecretBytes::new(vec![0u8; key_size]);
    pbkdf2::<HmacSha512>(
        password.expose_secret().as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        key.expose_secret_mut(),
    )
    .map_err(|e| EncryptorError::DeriveKey(format!("PBKDF2 failed: {e}")))?;

    Ok(key)
}

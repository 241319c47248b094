// src/encryptor/mod.rs

//! # Encryptor Facade
//!
//! [`Encryptor`] owns a password and an [`EncryptorConfiguration`] and exposes
//! the stream operations on top of them. Every call derives fresh keys and
//! builds its own cipher and MAC contexts, so operations take `&self` and an
//! encryptor can be shared across threads.
//!
//! Lifecycle: `Active` → `Disposed`. Once disposed, every operation fails with
//! [`EncryptorError::UseAfterDispose`] before touching its arguments.
//!
//! ```
//! use streamcrypt::{AesHmacEncryptor, PasswordString};
//! use std::io::Cursor;
//!
//! let encryptor = AesHmacEncryptor::from_password(PasswordString::new("password".to_string()))?;
//! let container = encryptor.encrypt(&mut &b"attack at dawn"[..])?;
//! assert!(encryptor.authenticate(&mut Cursor::new(&container))?);
//! assert_eq!(encryptor.decrypt(&mut Cursor::new(&container))?, b"attack at dawn");
//! # Ok::<(), streamcrypt::EncryptorError>(())
//! ```

use crate::aliases::{HmacSha256, PasswordString};
use crate::authentication::{authenticate, AuthenticationResult};
use crate::config::EncryptorConfiguration;
use crate::consts::SUPPORTED_KEY_SIZES;
use crate::crypto::mac::MacAlgorithm;
use crate::decryption::decrypt_authenticated;
use crate::encryption::encrypt_stream;
use crate::error::EncryptorError;
use std::fmt;
use std::io::{Cursor, Read, Seek, Write};
use std::marker::PhantomData;

/// AES with an HMAC-SHA256 tag: the default pairing.
pub type AesHmacEncryptor = Encryptor<HmacSha256>;

enum State {
    Active(PasswordString),
    Disposed,
}

/// Password-based encrypt-then-MAC over byte streams.
pub struct Encryptor<M: MacAlgorithm = HmacSha256> {
    state: State,
    configuration: EncryptorConfiguration,
    _mac: PhantomData<fn() -> M>,
}

impl<M: MacAlgorithm> Encryptor<M> {
    /// Create an encryptor.
    ///
    /// # Errors
    ///
    /// - [`EncryptorError::InvalidInput`] if `password` is empty
    /// - [`EncryptorError::InvalidConfiguration`] if a size is zero or the key
    ///   size is not an AES key size (16, 24 or 32)
    pub fn new(
        password: PasswordString,
        configuration: EncryptorConfiguration,
    ) -> Result<Self, EncryptorError> {
        check_password(&password)?;
        if !configuration.is_valid() {
            return Err(EncryptorError::InvalidConfiguration(format!(
                "sizes must be positive: {configuration:?}"
            )));
        }
        if !SUPPORTED_KEY_SIZES.contains(&configuration.key_size()) {
            return Err(EncryptorError::InvalidConfiguration(format!(
                "unsupported AES key size: {} bits",
                configuration.key_size_bits()
            )));
        }

        tracing::debug!(
            mac = M::NAME,
            key_bits = configuration.key_size_bits(),
            mode = ?configuration.cipher_mode(),
            padding = ?configuration.padding_mode(),
            "encryptor created"
        );
        Ok(Self {
            state: State::Active(password),
            configuration,
            _mac: PhantomData,
        })
    }

    /// [`Encryptor::new`] with [`EncryptorConfiguration::default`].
    pub fn from_password(password: PasswordString) -> Result<Self, EncryptorError> {
        Self::new(password, EncryptorConfiguration::default())
    }

    fn password(&self) -> Result<&PasswordString, EncryptorError> {
        match &self.state {
            State::Active(password) => Ok(password),
            State::Disposed => Err(EncryptorError::UseAfterDispose),
        }
    }

    /// Encrypt everything readable from `input` into a new container.
    ///
    /// # Errors
    ///
    /// [`EncryptorError::InvalidInput`] for an empty stream,
    /// [`EncryptorError::Encryption`] for any failure while building the
    /// container, [`EncryptorError::UseAfterDispose`] once disposed.
    pub fn encrypt<R: Read>(&self, input: &mut R) -> Result<Vec<u8>, EncryptorError> {
        let mut container = Cursor::new(Vec::new());
        self.encrypt_to(input, &mut container)?;
        Ok(container.into_inner())
    }

    /// Encrypt `input` into `output`, starting at its current position.
    ///
    /// `output` must end at that position; a sink with bytes after it is
    /// rejected with [`EncryptorError::InvalidInput`]. On success `output` is
    /// positioned at the start of the container.
    pub fn encrypt_to<R, W>(&self, input: &mut R, output: &mut W) -> Result<(), EncryptorError>
    where
        R: Read,
        W: Read + Write + Seek,
    {
        let password = self.password()?;
        encrypt_stream::<M, _, _>(input, output, password, &self.configuration)
    }

    /// Verify and decrypt the container at the current position of `container`.
    ///
    /// # Errors
    ///
    /// [`EncryptorError::TamperedData`] if the MAC does not verify, including
    /// when the password is wrong. No plaintext is produced in that case.
    pub fn decrypt<R: Read + Seek>(&self, container: &mut R) -> Result<Vec<u8>, EncryptorError> {
        let mut plaintext = Vec::new();
        self.decrypt_to(container, &mut plaintext)?;
        Ok(plaintext)
    }

    /// Verify and decrypt `container` into `output`.
    ///
    /// Plaintext is written only after the whole container has been
    /// authenticated.
    pub fn decrypt_to<R, W>(&self, container: &mut R, output: &mut W) -> Result<(), EncryptorError>
    where
        R: Read + Seek,
        W: Write,
    {
        let password = self.password()?;
        let auth = self
            .authenticate_consuming(container)
            .map_err(EncryptorError::into_decryption)?;
        decrypt_authenticated(container, auth, output, password, &self.configuration)
    }

    /// Check the container MAC without consuming it.
    ///
    /// The position of `container` is unchanged afterwards. A wrong password
    /// or a modified container yields `Ok(false)`.
    pub fn authenticate<R: Read + Seek>(&self, container: &mut R) -> Result<bool, EncryptorError> {
        let password = self.password()?;
        let result = authenticate::<M, _>(
            container,
            password,
            self.configuration.salt_size(),
            self.configuration.buffer_size(),
            true,
        )?;
        Ok(result.success())
    }

    pub(crate) fn authenticate_consuming<R: Read + Seek>(
        &self,
        container: &mut R,
    ) -> Result<AuthenticationResult, EncryptorError> {
        let password = self.password()?;
        authenticate::<M, _>(
            container,
            password,
            self.configuration.salt_size(),
            self.configuration.buffer_size(),
            false,
        )
    }

    /// Replace the password used by later operations.
    pub fn set_password(&mut self, password: PasswordString) -> Result<(), EncryptorError> {
        self.password()?;
        check_password(&password)?;
        self.state = State::Active(password);
        Ok(())
    }

    /// Drop the password. Idempotent.
    pub fn dispose(&mut self) {
        if let State::Active(_) = self.state {
            tracing::debug!(mac = M::NAME, "encryptor disposed");
        }
        self.state = State::Disposed;
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self.state, State::Disposed)
    }

    pub fn configuration(&self) -> &EncryptorConfiguration {
        &self.configuration
    }

    /// Length in bytes of the stored MAC tag.
    pub fn tag_size(&self) -> usize {
        M::tag_size()
    }
}

impl<M: MacAlgorithm> fmt::Debug for Encryptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encryptor")
            .field("mac", &M::NAME)
            .field("configuration", &self.configuration)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

fn check_password(password: &PasswordString) -> Result<(), EncryptorError> {
    if password.expose_secret().is_empty() {
        return Err(EncryptorError::InvalidInput(
            "password may not be empty".into(),
        ));
    }
    Ok(())
}

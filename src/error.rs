//! # Error Types
//!
//! Every fallible operation returns [`Result<T, EncryptorError>`](EncryptorError).
//! [`EncryptorError::kind`] flattens an error into its [`ErrorKind`] so callers can
//! tell a configuration mistake from a tamper event from a stream failure without
//! matching on wrapped causes.

use thiserror::Error;

/// The error type for all encryptor operations.
#[derive(Error, Debug)]
pub enum EncryptorError {
    /// An argument was empty or out of range (password, stream, salt, size).
    ///
    /// Raised before any work begins; fixing the argument and retrying is safe.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The supplied [`EncryptorConfiguration`](crate::EncryptorConfiguration)
    /// failed validation. Only raised at construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The password-based KDF failed.
    #[error("Error deriving key: {0}")]
    DeriveKey(String),

    /// The secure random source failed.
    #[error("Error generating IV: {0}")]
    GenerateIv(String),

    /// The block cipher rejected its key, IV, alignment or padding.
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// The container MAC did not verify. Plaintext is never produced.
    #[error("Data has been modified after encryption")]
    TamperedData,

    /// Failure anywhere in the encryption pipeline; the cause is the source.
    #[error("Error encrypting stream: {0}")]
    Encryption(#[source] Box<EncryptorError>),

    /// Failure in the decryption pipeline after authentication succeeded.
    #[error("Error decrypting stream: {0}")]
    Decryption(#[source] Box<EncryptorError>),

    /// The encryptor was disposed.
    #[error("Encryptor has been disposed")]
    UseAfterDispose,

    /// A fixed-size container field ran past the end of the input.
    #[error("Truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    /// I/O error on the underlying source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`EncryptorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidConfiguration,
    DeriveKeyError,
    GenerateIVError,
    Cipher,
    TamperedData,
    EncryptionError,
    DecryptionError,
    UseAfterDispose,
    TruncatedInput,
    Io,
}

impl EncryptorError {
    /// The kind of this error, without looking through wrapped causes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncryptorError::InvalidInput(_) => ErrorKind::InvalidInput,
            EncryptorError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            EncryptorError::DeriveKey(_) => ErrorKind::DeriveKeyError,
            EncryptorError::GenerateIv(_) => ErrorKind::GenerateIVError,
            EncryptorError::Cipher(_) => ErrorKind::Cipher,
            EncryptorError::TamperedData => ErrorKind::TamperedData,
            EncryptorError::Encryption(_) => ErrorKind::EncryptionError,
            EncryptorError::Decryption(_) => ErrorKind::DecryptionError,
            EncryptorError::UseAfterDispose => ErrorKind::UseAfterDispose,
            EncryptorError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            EncryptorError::Io(_) => ErrorKind::Io,
        }
    }

    /// Wrap as [`EncryptorError::Encryption`]. Caller-facing kinds pass through.
    pub(crate) fn into_encryption(self) -> Self {
        match self {
            e @ (EncryptorError::InvalidInput(_)
            | EncryptorError::UseAfterDispose
            | EncryptorError::Encryption(_)) => e,
            other => EncryptorError::Encryption(Box::new(other)),
        }
    }

    /// Wrap as [`EncryptorError::Decryption`]. Tamper detection is never wrapped.
    pub(crate) fn into_decryption(self) -> Self {
        match self {
            e @ (EncryptorError::InvalidInput(_)
            | EncryptorError::UseAfterDispose
            | EncryptorError::TamperedData
            | EncryptorError::Decryption(_)) => e,
            other => EncryptorError::Decryption(Box::new(other)),
        }
    }
}

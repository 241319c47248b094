//! # Encryptor Configuration
//!
//! Cipher mode, padding and the three sizes that shape the container. A
//! configuration is a plain `Copy` value; equality is structural over all five
//! fields.

use crate::consts::{DEFAULT_BUFFER_SIZE, DEFAULT_KEY_SIZE, DEFAULT_SALT_SIZE};

const BIT_MULTIPLIER: usize = 8;

/// Block cipher chaining mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherMode {
    /// Cipher block chaining.
    #[default]
    Cbc,
    /// Electronic codebook. Identical plaintext blocks leak; kept for interop.
    Ecb,
    /// Cipher feedback with full-block (128-bit) feedback.
    Cfb,
}

/// Padding applied to the final plaintext block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaddingMode {
    /// `n` bytes of value `n`; a full block is added to aligned input.
    #[default]
    Pkcs7,
    /// Zero fill. Decryption truncates to the stored plaintext length.
    Zeros,
    /// Zero fill, last byte holds the pad length.
    AnsiX923,
    /// Random fill, last byte holds the pad length.
    Iso10126,
    /// No padding; plaintext must be block aligned.
    None,
}

/// Immutable encryptor settings.
///
/// ```
/// use streamcrypt::{CipherMode, EncryptorConfiguration, PaddingMode};
///
/// let config = EncryptorConfiguration::new(CipherMode::Cbc, PaddingMode::Pkcs7, 32, 16, 4096);
/// assert_eq!(config, EncryptorConfiguration::default());
/// assert!(config.is_valid());
/// assert_eq!(config.key_size_bits(), 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncryptorConfiguration {
    cipher_mode: CipherMode,
    padding_mode: PaddingMode,
    key_size: usize,
    salt_size: usize,
    buffer_size: usize,
}

impl EncryptorConfiguration {
    pub const fn new(
        cipher_mode: CipherMode,
        padding_mode: PaddingMode,
        key_size: usize,
        salt_size: usize,
        buffer_size: usize,
    ) -> Self {
        Self {
            cipher_mode,
            padding_mode,
            key_size,
            salt_size,
            buffer_size,
        }
    }

    pub const fn cipher_mode(&self) -> CipherMode {
        self.cipher_mode
    }

    pub const fn padding_mode(&self) -> PaddingMode {
        self.padding_mode
    }

    /// Length in bytes of the derived encryption key.
    pub const fn key_size(&self) -> usize {
        self.key_size
    }

    /// Length in bytes of the key salt and of the auth salt.
    pub const fn salt_size(&self) -> usize {
        self.salt_size
    }

    /// Chunk size for streaming reads and writes.
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub const fn key_size_bits(&self) -> usize {
        self.key_size * BIT_MULTIPLIER
    }

    /// `true` iff every size is positive.
    pub const fn is_valid(&self) -> bool {
        self.key_size > 0 && self.salt_size > 0 && self.buffer_size > 0
    }

    #[must_use]
    pub const fn with_cipher_mode(mut self, cipher_mode: CipherMode) -> Self {
        self.cipher_mode = cipher_mode;
        self
    }

    #[must_use]
    pub const fn with_padding_mode(mut self, padding_mode: PaddingMode) -> Self {
        self.padding_mode = padding_mode;
        self
    }

    #[must_use]
    pub const fn with_key_size(mut self, key_size: usize) -> Self {
        self.key_size = key_size;
        self
    }

    #[must_use]
    pub const fn with_salt_size(mut self, salt_size: usize) -> Self {
        self.salt_size = salt_size;
        self
    }

    #[must_use]
    pub const fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

impl Default for EncryptorConfiguration {
    fn default() -> Self {
        Self::new(
            CipherMode::Cbc,
            PaddingMode::Pkcs7,
            DEFAULT_KEY_SIZE,
            DEFAULT_SALT_SIZE,
            DEFAULT_BUFFER_SIZE,
        )
    }
}

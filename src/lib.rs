// src/lib.rs

//! Password-based encrypt-then-MAC for arbitrary byte streams.
//!
//! A container is `tag ‖ auth salt ‖ length ‖ key salt ‖ IV ‖ ciphertext`:
//! AES under a PBKDF2-derived key, authenticated by an HMAC keyed from a
//! second, independent derivation. See [`ContainerLayout`].

pub mod aliases;
pub mod authentication;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod codec;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod decryption;
pub mod encryption;
pub mod encryptor;
pub mod error;
pub mod utils;

// High-level API
pub use encryptor::{AesHmacEncryptor, Encryptor};
pub use config::{CipherMode, EncryptorConfiguration, PaddingMode};
pub use error::{EncryptorError, ErrorKind};

pub use aliases::{HmacSha256, HmacSha512, PasswordString, SecretBytes};

// Stream engines, for callers that manage their own password and configuration
pub use authentication::{authenticate, AuthenticationResult};
pub use decryption::decrypt_stream;
pub use encryption::encrypt_stream;

pub use codec::ContainerLayout;
pub use crypto::kdf::derive_key;
pub use crypto::mac::MacAlgorithm;
pub use crypto::rng::generate_random;

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};

// src/encryption/mod.rs

//! Encrypt path of the encryption engine.
//!
//! Core API: `encrypt_stream::<M, _, _>(input, output, &password, &config)?`.

pub(crate) mod encrypt;
pub(crate) mod stream;

pub use encrypt::encrypt_stream;

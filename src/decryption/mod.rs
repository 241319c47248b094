// src/decryption/mod.rs

//! Decrypt path of the encryption engine.
//!
//! Core API: `decrypt_stream::<M, _, _>(container, output, &password, &config)?`.
//! Authentication always runs first; nothing is decrypted from a container
//! whose MAC does not verify.

pub(crate) mod decrypt;
pub(crate) mod stream;

pub(crate) use decrypt::decrypt_authenticated;
pub use decrypt::decrypt_stream;

// src/crypto/mod.rs

//! Capability layer over the primitives: key derivation, secure randomness,
//! the MAC trait and the AES streaming cipher.
//!
//! Nothing in here knows about the container layout.

pub mod cipher;
pub mod kdf;
pub mod mac;
pub mod rng;

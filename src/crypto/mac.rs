// src/crypto/mac.rs

//! MAC capability interface.
//!
//! [`MacAlgorithm`] is the seam between the container logic and the keyed hash.
//! It is implemented for [`HmacSha256`] (the default) and [`HmacSha512`].

use crate::aliases::{HmacSha256, HmacSha512};
use crate::error::EncryptorError;
use hmac::digest::OutputSizeUser;
use hmac::{digest::KeyInit, Mac};

/// A keyed hash usable as the container authenticator.
pub trait MacAlgorithm: Mac + KeyInit + Clone {
    /// Length of the derived MAC key (the hash block size).
    const KEY_SIZE: usize;

    /// Human-readable name, used in diagnostics.
    const NAME: &'static str;

    /// Length of the tag stored at the start of the container.
    fn tag_size() -> usize {
        <Self as OutputSizeUser>::output_size()
    }

    /// Key a fresh MAC instance.
    fn keyed(key: &[u8]) -> Result<Self, EncryptorError> {
        <Self as KeyInit>::new_from_slice(key)
            .map_err(|e| EncryptorError::DeriveKey(format!("{} rejected key: {e}", Self::NAME)))
    }
}

impl MacAlgorithm for HmacSha256 {
    const KEY_SIZE: usize = 64;
    const NAME: &'static str = "HMAC-SHA256";
}

impl MacAlgorithm for HmacSha512 {
    const KEY_SIZE: usize = 128;
    const NAME: &'static str = "HMAC-SHA512";
}

//! src/codec/layout.rs
//! Offsets and sizes of the container fields.

use crate::config::PaddingMode;
use crate::consts::{AES_BLOCK_SIZE, LENGTH_FIELD_SIZE};
use crate::crypto::cipher::ciphertext_len;

/// Field geometry for one (MAC, salt size) combination.
///
/// All offsets are relative to the first byte of the container.
///
/// ```
/// use streamcrypt::{ContainerLayout, PaddingMode};
///
/// let layout = ContainerLayout::new(32, 16);
/// assert_eq!(layout.length_offset(), 48);
/// assert_eq!(layout.ciphertext_offset(), 104 - 16);
/// assert_eq!(layout.container_len(8, PaddingMode::Pkcs7), Some(104));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLayout {
    tag_size: usize,
    salt_size: usize,
    iv_size: usize,
}

impl ContainerLayout {
    pub const fn new(tag_size: usize, salt_size: usize) -> Self {
        Self {
            tag_size,
            salt_size,
            iv_size: AES_BLOCK_SIZE,
        }
    }

    pub const fn tag_size(&self) -> usize {
        self.tag_size
    }

    pub const fn salt_size(&self) -> usize {
        self.salt_size
    }

    pub const fn iv_size(&self) -> usize {
        self.iv_size
    }

    pub const fn auth_salt_offset(&self) -> usize {
        self.tag_size
    }

    /// MAC + auth salt: the region the MAC does not cover.
    pub const fn auth_fields_len(&self) -> usize {
        self.tag_size + self.salt_size
    }

    /// Start of the MAC-covered region.
    pub const fn length_offset(&self) -> usize {
        self.auth_fields_len()
    }

    pub const fn key_salt_offset(&self) -> usize {
        self.length_offset() + LENGTH_FIELD_SIZE
    }

    pub const fn iv_offset(&self) -> usize {
        self.key_salt_offset() + self.salt_size
    }

    pub const fn ciphertext_offset(&self) -> usize {
        self.iv_offset() + self.iv_size
    }

    /// Total container size for `plaintext_len` bytes, or `None` when the
    /// padding mode cannot encrypt that length.
    pub fn container_len(&self, plaintext_len: u64, padding: PaddingMode) -> Option<u64> {
        ciphertext_len(plaintext_len, padding)?.checked_add(self.ciphertext_offset() as u64)
    }
}

//! src/crypto/cipher.rs
//! AES block streaming with CBC / ECB / CFB chaining and block padding.
//!
//! [`CipherStream`] accepts input in arbitrary chunk sizes and emits whole
//! blocks. On decryption the last full block is held back until
//! [`CipherStream::finalize`] so padding can be stripped.

use crate::aliases::{Block16, SecretBytes};
use crate::config::{CipherMode, PaddingMode};
use crate::consts::AES_BLOCK_SIZE;
use crate::crypto::rng::fill_random;
use crate::error::EncryptorError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block as AesBlock};

/// AES keyed for one operation; key size selects the variant.
enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    fn new(key: &[u8]) -> Result<Self, EncryptorError> {
        let invalid = |_| EncryptorError::Cipher(format!("invalid AES key length {}", key.len()));
        match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            n => Err(EncryptorError::Cipher(format!(
                "unsupported AES key length {n} (expected 16, 24 or 32)"
            ))),
        }
    }

    #[inline(always)]
    fn encrypt_block(&self, block: &mut [u8]) {
        let mut aes_block = AesBlock::clone_from_slice(block);
        match self {
            Self::Aes128(c) => c.encrypt_block(&mut aes_block),
            Self::Aes192(c) => c.encrypt_block(&mut aes_block),
            Self::Aes256(c) => c.encrypt_block(&mut aes_block),
        }
        block.copy_from_slice(&aes_block);
    }

    #[inline(always)]
    fn decrypt_block(&self, block: &mut [u8]) {
        let mut aes_block = AesBlock::clone_from_slice(block);
        match self {
            Self::Aes128(c) => c.decrypt_block(&mut aes_block),
            Self::Aes192(c) => c.decrypt_block(&mut aes_block),
            Self::Aes256(c) => c.decrypt_block(&mut aes_block),
        }
        block.copy_from_slice(&aes_block);
    }
}

/// Direction of a [`CipherStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Cipher + chaining state for one block at a time.
struct BlockChain {
    cipher: AesCipher,
    mode: CipherMode,
    // previous ciphertext block (the IV before the first block)
    prev: Block16,
}

impl BlockChain {
    fn encrypt(&mut self, block: &mut [u8]) {
        let prev = self.prev.expose_secret_mut();
        match self.mode {
            CipherMode::Ecb => self.cipher.encrypt_block(block),
            CipherMode::Cbc => {
                let mut mixed = [0u8; AES_BLOCK_SIZE];
                xor_blocks(block, prev, &mut mixed);
                self.cipher.encrypt_block(&mut mixed);
                block.copy_from_slice(&mixed);
                prev.copy_from_slice(block);
            }
            CipherMode::Cfb => {
                let mut keystream = *prev;
                self.cipher.encrypt_block(&mut keystream);
                let mut out = [0u8; AES_BLOCK_SIZE];
                xor_blocks(block, &keystream, &mut out);
                block.copy_from_slice(&out);
                prev.copy_from_slice(block);
            }
        }
    }

    fn decrypt(&mut self, block: &mut [u8]) {
        let prev = self.prev.expose_secret_mut();
        match self.mode {
            CipherMode::Ecb => self.cipher.decrypt_block(block),
            CipherMode::Cbc => {
                let mut ciphertext = [0u8; AES_BLOCK_SIZE];
                ciphertext.copy_from_slice(block);
                self.cipher.decrypt_block(block);
                let mut out = [0u8; AES_BLOCK_SIZE];
                xor_blocks(block, prev, &mut out);
                block.copy_from_slice(&out);
                *prev = ciphertext;
            }
            CipherMode::Cfb => {
                let mut keystream = *prev;
                self.cipher.encrypt_block(&mut keystream);
                prev.copy_from_slice(block);
                let mut out = [0u8; AES_BLOCK_SIZE];
                xor_blocks(block, &keystream, &mut out);
                block.copy_from_slice(&out);
            }
        }
    }
}

/// Chunked AES encryptor/decryptor with padding.
pub struct CipherStream {
    chain: BlockChain,
    padding: PaddingMode,
    direction: Direction,
    pending: SecretBytes,
}

impl CipherStream {
    /// Key a new stream. `iv` must be one block long; ECB ignores its value.
    pub fn new(
        direction: Direction,
        key: &[u8],
        iv: &[u8],
        mode: CipherMode,
        padding: PaddingMode,
    ) -> Result<Self, EncryptorError> {
        if iv.len() != AES_BLOCK_SIZE {
            return Err(EncryptorError::Cipher(format!(
                "IV must be {AES_BLOCK_SIZE} bytes, got {}",
                iv.len()
            )));
        }
        let mut prev = [0u8; AES_BLOCK_SIZE];
        prev.copy_from_slice(iv);

        Ok(Self {
            chain: BlockChain {
                cipher: AesCipher::new(key)?,
                mode,
                prev: Block16::new(prev),
            },
            padding,
            direction,
            pending: SecretBytes::new(Vec::with_capacity(2 * AES_BLOCK_SIZE)),
        })
    }

    /// Feed `input`, appending every block that is ready to `output`.
    pub fn update(&mut self, input: &[u8], output: &mut Vec<u8>) {
        let buf = self.pending.expose_secret_mut();
        buf.extend_from_slice(input);

        let aligned = buf.len() - buf.len() % AES_BLOCK_SIZE;
        let ready = match self.direction {
            Direction::Encrypt => aligned,
            // hold back the last block: it may carry padding
            Direction::Decrypt if aligned == buf.len() => aligned.saturating_sub(AES_BLOCK_SIZE),
            Direction::Decrypt => aligned,
        };
        if ready == 0 {
            return;
        }

        for block in buf[..ready].chunks_exact_mut(AES_BLOCK_SIZE) {
            match self.direction {
                Direction::Encrypt => self.chain.encrypt(block),
                Direction::Decrypt => self.chain.decrypt(block),
            }
        }
        output.extend_from_slice(&buf[..ready]);
        // decrypted blocks are plaintext; wipe before draining
        buf[..ready].fill(0);
        buf.drain(..ready);
    }

    /// Flush the final block, applying or stripping padding.
    ///
    /// # Errors
    ///
    /// [`EncryptorError::Cipher`] when the input is not block aligned and the
    /// padding mode cannot fix that, or when decrypted padding is malformed.
    pub fn finalize(mut self, output: &mut Vec<u8>) -> Result<(), EncryptorError> {
        match self.direction {
            Direction::Encrypt => self.finalize_encrypt(output),
            Direction::Decrypt => self.finalize_decrypt(output),
        }
    }

    fn finalize_encrypt(&mut self, output: &mut Vec<u8>) -> Result<(), EncryptorError> {
        let buf = self.pending.expose_secret_mut();
        let used = buf.len();
        let pad = AES_BLOCK_SIZE - used;

        match self.padding {
            PaddingMode::None if used == 0 => return Ok(()),
            PaddingMode::None => {
                return Err(EncryptorError::Cipher(
                    "input length is not a multiple of the block size and padding is disabled"
                        .into(),
                ))
            }
            PaddingMode::Zeros if used == 0 => return Ok(()),
            PaddingMode::Zeros => buf.resize(AES_BLOCK_SIZE, 0),
            PaddingMode::Pkcs7 => buf.resize(AES_BLOCK_SIZE, pad as u8),
            PaddingMode::AnsiX923 => {
                buf.resize(AES_BLOCK_SIZE, 0);
                buf[AES_BLOCK_SIZE - 1] = pad as u8;
            }
            PaddingMode::Iso10126 => {
                buf.resize(AES_BLOCK_SIZE, 0);
                fill_random(&mut buf[used..AES_BLOCK_SIZE - 1])?;
                buf[AES_BLOCK_SIZE - 1] = pad as u8;
            }
        }

        self.chain.encrypt(&mut buf[..]);
        output.extend_from_slice(&buf[..]);
        Ok(())
    }

    fn finalize_decrypt(&mut self, output: &mut Vec<u8>) -> Result<(), EncryptorError> {
        let buf = self.pending.expose_secret_mut();
        let strips = !matches!(self.padding, PaddingMode::None | PaddingMode::Zeros);

        match buf.len() {
            0 if !strips => return Ok(()),
            0 => return Err(EncryptorError::Cipher("ciphertext is empty".into())),
            AES_BLOCK_SIZE => {}
            n => {
                return Err(EncryptorError::Cipher(format!(
                    "ciphertext is not block aligned ({n} trailing bytes)"
                )))
            }
        }

        self.chain.decrypt(&mut buf[..]);
        let keep = AES_BLOCK_SIZE - strip_len(self.padding, buf)?;
        output.extend_from_slice(&buf[..keep]);
        buf.fill(0);
        Ok(())
    }
}

/// Number of padding bytes at the end of the decrypted final `block`.
fn strip_len(padding: PaddingMode, block: &[u8]) -> Result<usize, EncryptorError> {
    if matches!(padding, PaddingMode::None | PaddingMode::Zeros) {
        return Ok(0);
    }

    let pad = block[AES_BLOCK_SIZE - 1] as usize;
    if !(1..=AES_BLOCK_SIZE).contains(&pad) {
        return Err(EncryptorError::Cipher(format!("invalid {padding:?} padding")));
    }

    let filler = &block[AES_BLOCK_SIZE - pad..AES_BLOCK_SIZE - 1];
    let valid = match padding {
        PaddingMode::Pkcs7 => filler.iter().all(|&b| b as usize == pad),
        PaddingMode::AnsiX923 => filler.iter().all(|&b| b == 0),
        _ => true,
    };

    if valid {
        Ok(pad)
    } else {
        Err(EncryptorError::Cipher(format!("invalid {padding:?} padding")))
    }
}

/// Ciphertext length produced for `plaintext_len` bytes, or `None` when the
/// padding mode cannot encrypt that length.
pub fn ciphertext_len(plaintext_len: u64, padding: PaddingMode) -> Option<u64> {
    let block = AES_BLOCK_SIZE as u64;
    match padding {
        PaddingMode::Pkcs7 | PaddingMode::AnsiX923 | PaddingMode::Iso10126 => {
            Some((plaintext_len / block + 1) * block)
        }
        PaddingMode::Zeros => Some(plaintext_len.div_ceil(block) * block),
        PaddingMode::None if plaintext_len % block == 0 => Some(plaintext_len),
        PaddingMode::None => None,
    }
}

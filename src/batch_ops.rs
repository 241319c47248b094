//! src/batch_ops.rs
//! Parallel encryption and decryption of many independent streams.

use rayon::prelude::*;
use std::io::{Read, Seek, Write};

use crate::crypto::mac::MacAlgorithm;
use crate::encryptor::Encryptor;
use crate::error::EncryptorError;

/// Encrypt every `(source, sink)` pair with one shared encryptor.
///
/// Stops at the first error; pairs already processed keep their output.
pub fn encrypt_batch<M, R, W>(
    encryptor: &Encryptor<M>,
    batch: &mut [(R, W)],
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    R: Read + Send,
    W: Read + Write + Seek + Send,
{
    tracing::debug!(streams = batch.len(), "batch encrypt");
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encryptor.encrypt_to(src, dst))
}

/// Decrypt every `(container, sink)` pair with one shared encryptor.
pub fn decrypt_batch<M, R, W>(
    encryptor: &Encryptor<M>,
    batch: &mut [(R, W)],
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    R: Read + Seek + Send,
    W: Write + Send,
{
    tracing::debug!(streams = batch.len(), "batch decrypt");
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encryptor.decrypt_to(src, dst))
}

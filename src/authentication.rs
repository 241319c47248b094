//! # Authentication Engine
//!
//! Verifies the container MAC. The tag covers everything from the length field
//! to the end of the container and is keyed by PBKDF2(password, auth salt).
//!
//! Two modes:
//! - **peek**: the source position is restored afterwards, nothing is returned;
//! - **consume**: the position is left at the length field and the covered
//!   bytes are handed back so decryption does not read them twice.
//!
//! A mismatch is an `Ok` result with `success == false`, never an error.

use crate::aliases::PasswordString;
use crate::codec::{read_chunk, read_field, ContainerLayout};
use crate::crypto::kdf::derive_key;
use crate::crypto::mac::MacAlgorithm;
use crate::error::EncryptorError;
use std::io::{Read, Seek, SeekFrom};

/// Outcome of verifying a container.
#[derive(Debug)]
pub struct AuthenticationResult {
    success: bool,
    remaining: Option<Vec<u8>>,
}

impl AuthenticationResult {
    fn new(success: bool, remaining: Option<Vec<u8>>) -> Self {
        Self { success, remaining }
    }

    /// Whether the stored MAC matched.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The MAC-covered bytes (length field through ciphertext), present only
    /// when verification consumed the source.
    pub fn remaining(&self) -> Option<&[u8]> {
        self.remaining.as_deref()
    }

    pub fn into_remaining(self) -> Option<Vec<u8>> {
        self.remaining
    }
}

/// Verify the container at the current position of `container`.
///
/// `salt_size` and `buffer_size` come from the encryptor configuration;
/// `buffer_size` bounds the chunk size used while hashing in peek mode.
///
/// # Errors
///
/// - [`EncryptorError::InvalidInput`] if nothing remains in `container`
/// - [`EncryptorError::Io`] if the source fails to read or seek
/// - [`EncryptorError::DeriveKey`] if the MAC key cannot be derived
pub fn authenticate<M, R>(
    container: &mut R,
    password: &PasswordString,
    salt_size: usize,
    buffer_size: usize,
    peek: bool,
) -> Result<AuthenticationResult, EncryptorError>
where
    M: MacAlgorithm,
    R: Read + Seek,
{
    let start = container.stream_position()?;
    let end = container.seek(SeekFrom::End(0))?;
    container.seek(SeekFrom::Start(start))?;
    if end <= start {
        return Err(EncryptorError::InvalidInput(
            "container may not be empty".into(),
        ));
    }

    let layout = ContainerLayout::new(M::tag_size(), salt_size);

    let fields = read_field(container, layout.tag_size())
        .and_then(|tag| Ok((tag, read_field(container, layout.salt_size())?)));
    let (stored_tag, auth_salt) = match fields {
        Ok(fields) => fields,
        Err(EncryptorError::TruncatedInput { expected, actual }) => {
            tracing::debug!(expected, actual, "container shorter than its auth fields");
            if peek {
                container.seek(SeekFrom::Start(start))?;
            }
            return Ok(AuthenticationResult::new(false, None));
        }
        Err(e) => return Err(e),
    };

    let mac_key = derive_key(password, &auth_salt, M::KEY_SIZE)?;
    let mut mac = M::keyed(mac_key.expose_secret())?;

    let remaining = if peek {
        if let Err(e) = hash_rest(container, &mut mac, buffer_size) {
            container.seek(SeekFrom::Start(start))?;
            return Err(e);
        }
        None
    } else {
        let mut rest = Vec::with_capacity((end - start) as usize);
        container.read_to_end(&mut rest)?;
        mac.update(&rest);
        Some(rest)
    };

    // constant-time comparison; a length mismatch fails
    let success = mac.verify_slice(&stored_tag).is_ok();

    let rewind_to = if peek {
        start
    } else {
        start + layout.auth_fields_len() as u64
    };
    container.seek(SeekFrom::Start(rewind_to))?;

    tracing::debug!(
        mac = M::NAME,
        container_len = end - start,
        peek,
        success,
        "authenticated container"
    );
    Ok(AuthenticationResult::new(success, remaining))
}

fn hash_rest<M, R>(
    container: &mut R,
    mac: &mut M,
    buffer_size: usize,
) -> Result<(), EncryptorError>
where
    M: MacAlgorithm,
    R: Read,
{
    let mut chunk = vec![0u8; buffer_size.max(1)];
    loop {
        let n = read_chunk(container, &mut chunk)?;
        if n == 0 {
            return Ok(());
        }
        mac.update(&chunk[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::HmacSha256;
    use crate::config::EncryptorConfiguration;
    use crate::encryption::encrypt_stream;
    use crate::error::ErrorKind;
    use std::io::{self, Cursor};

    fn password() -> PasswordString {
        PasswordString::new("password".to_string())
    }

    /// Source that is interrupted once at `interrupt_at` and fails for good
    /// from `fail_from` on.
    struct FlakySource {
        inner: Cursor<Vec<u8>>,
        interrupt_at: u64,
        interrupted: bool,
        fail_from: u64,
    }

    impl FlakySource {
        fn new(bytes: Vec<u8>, interrupt_at: u64, fail_from: u64) -> Self {
            Self {
                inner: Cursor::new(bytes),
                interrupt_at,
                interrupted: false,
                fail_from,
            }
        }
    }

    impl Read for FlakySource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let position = self.inner.position();
            if position >= self.fail_from {
                return Err(io::Error::other("device unplugged"));
            }
            if position >= self.interrupt_at && !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    impl Seek for FlakySource {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn container() -> Vec<u8> {
        let mut sink = Cursor::new(Vec::new());
        encrypt_stream::<HmacSha256, _, _>(
            &mut &b"flaky source payload"[..],
            &mut sink,
            &password(),
            &EncryptorConfiguration::default(),
        )
        .unwrap();
        sink.into_inner()
    }

    #[test]
    fn empty_container_is_invalid_input() {
        let mut empty = Cursor::new(Vec::<u8>::new());
        let err =
            authenticate::<HmacSha256, _>(&mut empty, &password(), 16, 256, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn short_container_fails_without_error() {
        let mut short = Cursor::new(vec![0xAB; 20]);
        short.set_position(3);
        let result =
            authenticate::<HmacSha256, _>(&mut short, &password(), 16, 256, true).unwrap();
        assert!(!result.success());
        assert!(result.remaining().is_none());
        assert_eq!(short.position(), 3);
    }

    #[test]
    fn garbage_container_fails_and_restores_position() {
        let mut garbage = Cursor::new(vec![0x5A; 120]);
        let result =
            authenticate::<HmacSha256, _>(&mut garbage, &password(), 16, 7, true).unwrap();
        assert!(!result.success());
        assert_eq!(garbage.position(), 0);

        let consumed =
            authenticate::<HmacSha256, _>(&mut garbage, &password(), 16, 7, false).unwrap();
        assert!(!consumed.success());
        assert_eq!(consumed.remaining().map(<[u8]>::len), Some(120 - 48));
        assert_eq!(garbage.position(), 48);
    }

    #[test]
    fn interrupted_reads_are_retried_while_hashing() {
        let mut source = FlakySource::new(container(), 60, u64::MAX);
        let result =
            authenticate::<HmacSha256, _>(&mut source, &password(), 16, 7, true).unwrap();
        assert!(source.interrupted);
        assert!(result.success());
        assert_eq!(source.inner.position(), 0);
    }

    #[test]
    fn failed_read_while_hashing_restores_position() {
        let mut source = FlakySource::new(container(), u64::MAX, 60);
        let err =
            authenticate::<HmacSha256, _>(&mut source, &password(), 16, 7, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(source.inner.position(), 0);
    }
}

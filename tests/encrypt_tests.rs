//! tests/encrypt_tests.rs
//! Container construction through the facade and the stream engine

mod common;

use common::{default_encryptor, password, test_data, SCENARIO_MESSAGE, TEST_PASSWORD};
use std::error::Error as _;
use std::io::{self, Cursor, Read, Seek, Write};
use streamcrypt::{
    encrypt_stream, AesHmacEncryptor, ContainerLayout, EncryptorConfiguration, ErrorKind,
    HmacSha256, HmacSha512, PaddingMode,
};

#[test]
fn eight_byte_message_gives_104_byte_container() {
    let container = default_encryptor()
        .encrypt(&mut &SCENARIO_MESSAGE[..])
        .unwrap();

    // 32 tag + 16 auth salt + 8 length + 16 key salt + 16 IV + 16 ciphertext
    assert_eq!(container.len(), 104);
    assert_eq!(&container[48..56], &8u64.to_le_bytes());
}

#[test]
fn container_len_matches_prediction() {
    let layout = ContainerLayout::new(32, 16);
    for len in [1usize, 15, 16, 17, 4096, 5000] {
        let plaintext = vec![0x41u8; len];
        let container = default_encryptor().encrypt(&mut plaintext.as_slice()).unwrap();
        assert_eq!(
            Some(container.len() as u64),
            layout.container_len(len as u64, PaddingMode::Pkcs7),
            "plaintext length {len}"
        );
    }
}

#[test]
fn encryption_is_randomized() {
    let enc = default_encryptor();
    let a = enc.encrypt(&mut test_data()).unwrap();
    let b = enc.encrypt(&mut test_data()).unwrap();
    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
    // salts and IV differ, not just the tag
    assert_ne!(a[32..48], b[32..48]);
    assert_ne!(a[56..88], b[56..88]);
}

#[test]
fn empty_input_is_invalid() {
    let err = default_encryptor().encrypt(&mut &[][..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn sink_is_rewound_to_container_start() {
    let mut sink = Cursor::new(Vec::new());
    sink.write_all(b"existing header").unwrap();

    default_encryptor()
        .encrypt_to(&mut &SCENARIO_MESSAGE[..], &mut sink)
        .unwrap();

    assert_eq!(sink.position(), 15);
    assert_eq!(&sink.get_ref()[..15], b"existing header");
    assert_eq!(sink.get_ref().len(), 15 + 104);

    let plaintext = default_encryptor().decrypt(&mut sink).unwrap();
    assert_eq!(plaintext, SCENARIO_MESSAGE);
}

#[test]
fn stream_engine_with_sha512_tag() {
    let mut container = Cursor::new(Vec::new());
    encrypt_stream::<HmacSha512, _, _>(
        &mut &SCENARIO_MESSAGE[..],
        &mut container,
        &password(TEST_PASSWORD),
        &EncryptorConfiguration::default(),
    )
    .unwrap();
    assert_eq!(container.get_ref().len(), 104 + 32);
    assert_eq!(container.stream_position().unwrap(), 0);
}

#[test]
fn stream_engine_rejects_empty_password_and_bad_config() {
    let mut sink = Cursor::new(Vec::new());
    let err = encrypt_stream::<HmacSha256, _, _>(
        &mut test_data(),
        &mut sink,
        &password(""),
        &EncryptorConfiguration::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = encrypt_stream::<HmacSha256, _, _>(
        &mut test_data(),
        &mut sink,
        &password(TEST_PASSWORD),
        &EncryptorConfiguration::default().with_buffer_size(0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    assert!(sink.get_ref().is_empty());
}

#[test]
fn unaligned_input_without_padding_is_an_encryption_error() {
    let mut sink = Cursor::new(Vec::new());
    let err = encrypt_stream::<HmacSha256, _, _>(
        &mut test_data(),
        &mut sink,
        &password(TEST_PASSWORD),
        &EncryptorConfiguration::default().with_padding_mode(PaddingMode::None),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncryptionError);
}

#[test]
fn small_buffer_streams_large_input() {
    let config = EncryptorConfiguration::default().with_buffer_size(7);
    let enc = AesHmacEncryptor::new(password(TEST_PASSWORD), config).unwrap();
    let plaintext: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    let container = enc.encrypt(&mut plaintext.as_slice()).unwrap();
    assert_eq!(container.len(), 88 + 1008);
    assert_eq!(enc.decrypt(&mut Cursor::new(container)).unwrap(), plaintext);
}

/// Yields `remaining` bytes, then fails every read.
struct FailingReader {
    remaining: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("read failed"));
        }
        let n = buf.len().min(self.remaining);
        buf[..n].fill(0x41);
        self.remaining -= n;
        Ok(n)
    }
}

#[test]
fn read_failures_are_encryption_errors_wherever_they_happen() {
    // before any byte, and after the first full chunk
    for remaining in [0, 5000] {
        let mut sink = Cursor::new(Vec::new());
        let err = default_encryptor()
            .encrypt_to(&mut FailingReader { remaining }, &mut sink)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncryptionError, "after {remaining} bytes");
        let source = err.source().map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("I/O error: read failed"));
    }
}

#[test]
fn sink_with_trailing_bytes_is_rejected() {
    let mut sink = Cursor::new(vec![0xEE; 500]);
    let err = default_encryptor()
        .encrypt_to(&mut &b"hello"[..], &mut sink)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(sink.position(), 0);
    assert_eq!(sink.get_ref(), &vec![0xEE; 500]);

    // same with the position inside existing content
    sink.set_position(499);
    let err = default_encryptor()
        .encrypt_to(&mut &b"hello"[..], &mut sink)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(sink.position(), 499);
    assert_eq!(sink.get_ref().len(), 500);
}

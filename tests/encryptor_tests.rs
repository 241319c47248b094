//! tests/encryptor_tests.rs
//! Construction, password replacement and disposal

mod common;

use common::{default_encryptor, password, test_data, TEST_DATA, TEST_PASSWORD};
use std::error::Error as _;
use std::io::Cursor;
use streamcrypt::{
    AesHmacEncryptor, EncryptorConfiguration, EncryptorError, ErrorKind, PaddingMode,
    PasswordString,
};

#[test]
fn construction_rejects_bad_arguments() {
    let cases = [
        (password(""), EncryptorConfiguration::default(), ErrorKind::InvalidInput),
        (
            password(TEST_PASSWORD),
            EncryptorConfiguration::default().with_key_size(0),
            ErrorKind::InvalidConfiguration,
        ),
        (
            password(TEST_PASSWORD),
            EncryptorConfiguration::default().with_salt_size(0),
            ErrorKind::InvalidConfiguration,
        ),
        (
            password(TEST_PASSWORD),
            EncryptorConfiguration::default().with_buffer_size(0),
            ErrorKind::InvalidConfiguration,
        ),
        (
            password(TEST_PASSWORD),
            EncryptorConfiguration::default().with_key_size(20),
            ErrorKind::InvalidConfiguration,
        ),
    ];

    for (pw, config, expected) in cases {
        let err = AesHmacEncryptor::new(pw, config).unwrap_err();
        assert_eq!(err.kind(), expected, "{config:?}");
    }
}

#[test]
fn configuration_is_exposed_unchanged() {
    let config = EncryptorConfiguration::default().with_buffer_size(256);
    let enc = AesHmacEncryptor::new(password(TEST_PASSWORD), config).unwrap();
    assert_eq!(*enc.configuration(), config);
    assert!(!enc.is_disposed());
}

#[test]
fn set_password_switches_keys() {
    let mut enc = default_encryptor();
    let old = enc.encrypt(&mut test_data()).unwrap();

    enc.set_password(password("rotated")).unwrap();
    let new = enc.encrypt(&mut test_data()).unwrap();

    assert_eq!(enc.decrypt(&mut Cursor::new(new)).unwrap(), TEST_DATA);
    let err = enc.decrypt(&mut Cursor::new(old)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TamperedData);
}

#[test]
fn set_password_rejects_empty() {
    let mut enc = default_encryptor();
    let err = enc.set_password(PasswordString::new(String::new())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    // the previous password is still in force
    let container = enc.encrypt(&mut test_data()).unwrap();
    assert!(default_encryptor()
        .authenticate(&mut Cursor::new(container))
        .unwrap());
}

#[test]
fn every_operation_fails_after_dispose() {
    let mut enc = default_encryptor();
    let container = enc.encrypt(&mut test_data()).unwrap();
    enc.dispose();

    let errors: Vec<EncryptorError> = vec![
        enc.encrypt(&mut test_data()).unwrap_err(),
        enc.decrypt(&mut Cursor::new(container.clone())).unwrap_err(),
        enc.authenticate(&mut Cursor::new(container.clone())).unwrap_err(),
        enc.set_password(password("again")).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::UseAfterDispose);
    }

    // idempotent
    enc.dispose();
    assert!(enc.is_disposed());
}

#[test]
fn dispose_checked_before_arguments() {
    let mut enc = default_encryptor();
    enc.dispose();
    let err = enc.encrypt(&mut &[][..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UseAfterDispose);
    let err = enc.set_password(password("")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UseAfterDispose);
}

#[test]
fn decryption_errors_carry_their_cause() {
    // authentic container written without padding, read back expecting PKCS7
    let config = EncryptorConfiguration::default().with_padding_mode(PaddingMode::None);
    let enc = AesHmacEncryptor::new(password(TEST_PASSWORD), config).unwrap();
    let container = enc.encrypt(&mut &[1u8; 16][..]).unwrap();

    let strict = AesHmacEncryptor::from_password(password(TEST_PASSWORD)).unwrap();
    let err = strict.decrypt(&mut Cursor::new(container)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecryptionError);
    assert!(err.source().is_some());
}

#[test]
fn shared_across_threads() {
    let enc = default_encryptor();
    std::thread::scope(|s| {
        for i in 0..4u8 {
            let enc = &enc;
            s.spawn(move || {
                let input = vec![i; 100 + i as usize];
                let container = enc.encrypt(&mut input.as_slice()).unwrap();
                assert_eq!(enc.decrypt(&mut Cursor::new(container)).unwrap(), input);
            });
        }
    });
}

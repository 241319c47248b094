//! tests/common.rs
//! Shared fixtures for the integration tests

use streamcrypt::{AesHmacEncryptor, EncryptorConfiguration, PasswordString};

/// Standard test password
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "password";

/// The eight-byte message used by the container size scenarios
#[allow(dead_code)]
pub const SCENARIO_MESSAGE: [u8; 8] = [80, 64, 1, 25, 97, 123, 0, 255];

#[allow(dead_code)]
pub const TEST_DATA: &[u8] = b"test data";

#[allow(dead_code)]
pub fn password(value: &str) -> PasswordString {
    PasswordString::new(value.to_string())
}

#[allow(dead_code)]
pub fn default_encryptor() -> AesHmacEncryptor {
    AesHmacEncryptor::new(password(TEST_PASSWORD), EncryptorConfiguration::default())
        .expect("default configuration is valid")
}

/// A reader over [`TEST_DATA`]; `&mut TEST_DATA` would mutate a temporary const.
#[allow(dead_code)]
pub fn test_data() -> &'static [u8] {
    TEST_DATA
}

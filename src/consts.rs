//! # Constants
//!
//! Fixed parameters of the container format and the defaults used by
//! [`EncryptorConfiguration::default`](crate::EncryptorConfiguration).

/// PBKDF2-HMAC-SHA512 iteration count used for every key derivation.
///
/// The count is not stored in the container, so changing it breaks
/// decryption of previously written data.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Size in bytes of the plaintext length field (`u64`, little-endian).
pub const LENGTH_FIELD_SIZE: usize = 8;

/// AES block size; also the IV size.
pub const AES_BLOCK_SIZE: usize = 16;

/// Default derived encryption key length (32 bytes = AES-256).
pub const DEFAULT_KEY_SIZE: usize = 32;

/// Default salt size for both the key salt and the auth salt.
pub const DEFAULT_SALT_SIZE: usize = 16;

/// Default chunk size for streaming reads and writes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// AES key sizes accepted by the cipher.
pub const SUPPORTED_KEY_SIZES: [usize; 3] = [16, 24, 32];

//! # Key Derivation
//!
//! Password → key stretching. Both the encryption key and the MAC key of a
//! container are derived here, each from its own random salt.

pub mod pbkdf2;

pub use self::pbkdf2::derive_key;

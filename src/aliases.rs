//! # Secure-Gate Type Aliases
//!
//! Secret-bearing buffers used across the crate. Every type here is backed by
//! [`secure-gate`](https://github.com/Slurp9187/secure-gate), so contents are
//! zeroized on drop and only reachable through `.expose_secret()` /
//! `.expose_secret_mut()`.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - default container authenticator (32-byte tag)
//! - [`HmacSha512`] - alternative authenticator (64-byte tag), also the PBKDF2 PRF
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - the user passphrase
//! - [`SecretBytes`] - derived keys, salts and IVs whose size comes from configuration
//!
//! ### Fixed-Size Buffers
//! - [`Block16`] - one AES block of working state

use secure_gate::dynamic_alias;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
use hmac::Hmac;
use sha2::{Sha256, Sha512};

pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type Block16 = SpanBuffer<16>; // one AES block

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(PasswordString, String);
dynamic_alias!(SecretBytes, Vec<u8>); // derived keys, salts, IVs

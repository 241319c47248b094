// src/codec/mod.rs

//! Wire codec for the container.
//!
//! ```text
//! | MAC | auth salt | plaintext length (u64 LE) | key salt | IV | ciphertext |
//! ```
//!
//! Writing reserves the MAC, auth salt and length fields up front and
//! backfills them once known; reading consumes the same fields in order.

pub(crate) mod layout;
pub(crate) mod read;
pub(crate) mod write;

pub use layout::ContainerLayout;
pub(crate) use read::read_chunk;
pub use read::{read_exact_span, read_field};
pub use write::{backfill, reserve, write_field};

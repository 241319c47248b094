//! Utility functions used across the library.

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Branch-free over the block contents; used by the CBC and CFB chaining
/// paths in [`crate::crypto::cipher`].
///
/// # Panics (by contract)
///
/// Panics if `block_a`, `block_b` or `output` is shorter than 16 bytes. All
/// callers pass exactly one AES block.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

//! SSSE3 block loader for SM3 on x86-64.
//!
//! Only compiled on `x86_64` with the `simd` feature (gated at the module
//! declaration in `mod.rs`). Byte-swaps four 128-bit lanes with `pshufb`
//! instead of assembling each word from individual bytes.

use core::arch::x86_64::*;

use super::SM3_BLOCK_SIZE;

/// Load a block as sixteen big-endian words using `_mm_shuffle_epi8`.
#[target_feature(enable = "ssse3")]
pub(super) unsafe fn load_block(block: &[u8; SM3_BLOCK_SIZE]) -> [u32; 16] {
    // Reverse the bytes inside each 32-bit lane.
    let mask = _mm_set_epi8(12, 13, 14, 15, 8, 9, 10, 11, 4, 5, 6, 7, 0, 1, 2, 3);
    let mut words = [0u32; 16];

    for lane in 0..4 {
        let v = _mm_loadu_si128(block.as_ptr().add(lane * 16) as *const __m128i);
        let swapped = _mm_shuffle_epi8(v, mask);
        _mm_storeu_si128(words.as_mut_ptr().add(lane * 4) as *mut __m128i, swapped);
    }

    words
}

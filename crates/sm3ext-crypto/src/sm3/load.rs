//! Block loading: 64 message bytes to sixteen big-endian words.
//!
//! The software loader is the reference. On x86-64 with the `simd` feature
//! an SSSE3 byte-shuffle loader is selected at runtime when the CPU supports
//! it; both must produce identical words.

use std::sync::OnceLock;

use super::SM3_BLOCK_SIZE;

/// Strategy used to turn a block into schedule input words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockLoader {
    /// Portable `u32::from_be_bytes` loader.
    Soft,
    /// SSSE3 `pshufb` loader. Only constructed after runtime detection.
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    Ssse3,
}

impl BlockLoader {
    /// The fastest loader available on this CPU, detected once per process.
    pub(crate) fn detect() -> Self {
        static SELECTED: OnceLock<BlockLoader> = OnceLock::new();
        *SELECTED.get_or_init(|| {
            let loader = Self::probe();
            log::trace!("sm3 block loader: {loader:?}");
            loader
        })
    }

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    fn probe() -> Self {
        if is_x86_feature_detected!("ssse3") {
            BlockLoader::Ssse3
        } else {
            BlockLoader::Soft
        }
    }

    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    fn probe() -> Self {
        BlockLoader::Soft
    }

    #[inline]
    pub(crate) fn load(self, block: &[u8; SM3_BLOCK_SIZE]) -> [u32; 16] {
        match self {
            BlockLoader::Soft => load_block_soft(block),
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            // Safety: the Ssse3 variant is only produced by `probe` after
            // `is_x86_feature_detected!("ssse3")` succeeded.
            BlockLoader::Ssse3 => unsafe { super::ssse3::load_block(block) },
        }
    }
}

fn load_block_soft(block: &[u8; SM3_BLOCK_SIZE]) -> [u32; 16] {
    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

//! SM3 cryptographic hash algorithm.
//!
//! SM3 is a 256-bit cryptographic hash function standardized by the Chinese
//! government (GB/T 32905-2016). It is a Merkle-Damgard construction over a
//! 512-bit block compression function, structurally similar to SHA-256.
//!
//! [`Sm3`] is a streaming context: `update` any number of times, then
//! `finish` once. [`Sm3::resume`] starts a context from an arbitrary chaining
//! value, which is what makes length extension possible.

mod compress;
mod load;
mod pad;
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod ssse3;

use sm3ext_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::provider::{Digest, HashAlgorithm};
use compress::compress_blocks;
use load::BlockLoader;

pub use pad::{md_padding, padding_len};

/// SM3 output size in bytes.
pub const SM3_OUTPUT_SIZE: usize = 32;

/// SM3 block size in bytes.
pub const SM3_BLOCK_SIZE: usize = 64;

/// Longest input in bytes whose bit length still fits the 64-bit length field.
pub const SM3_MAX_INPUT_LEN: u64 = u64::MAX >> 3;

/// Initial chaining value.
pub(crate) const IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// IV loaded, nothing absorbed.
    Fresh,
    /// Accepting input.
    Absorbing,
    /// Digest produced; only `output` and `reset` are valid.
    Finalized,
}

/// SM3 hash context.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm3 {
    /// Internal state (eight 32-bit words, A..H).
    state: [u32; 8],
    /// Number of bytes processed so far, including buffered bytes.
    count: u64,
    /// Partial block buffer.
    buffer: [u8; SM3_BLOCK_SIZE],
    /// Number of bytes in the buffer, always below the block size.
    buffer_len: usize,
    #[zeroize(skip)]
    phase: Phase,
    #[zeroize(skip)]
    loader: BlockLoader,
}

impl Sm3 {
    /// Create a new SM3 hash context.
    pub fn new() -> Self {
        Self {
            state: IV,
            count: 0,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_len: 0,
            phase: Phase::Fresh,
            loader: BlockLoader::detect(),
        }
    }

    /// Create a context that continues from a published chaining value.
    ///
    /// `chaining_value` is a digest (or any intermediate state) in its
    /// big-endian byte form and `processed_len` is the number of bytes the
    /// original computation had already compressed, padding included. The
    /// length must be a whole number of blocks, since a digest carries no
    /// buffered bytes.
    pub fn resume(
        chaining_value: &[u8; SM3_OUTPUT_SIZE],
        processed_len: u64,
    ) -> Result<Self, CryptoError> {
        if processed_len % SM3_BLOCK_SIZE as u64 != 0 {
            return Err(CryptoError::InvalidLength(
                "resumed length is not a multiple of the block size",
            ));
        }
        if processed_len > SM3_MAX_INPUT_LEN {
            return Err(CryptoError::InvalidLength(
                "resumed length exceeds the SM3 length field",
            ));
        }

        let mut state = [0u32; 8];
        for (word, bytes) in state.iter_mut().zip(chaining_value.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        log::debug!("sm3: resuming after {processed_len} bytes");

        Ok(Self {
            state,
            count: processed_len,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_len: 0,
            phase: Phase::Absorbing,
            loader: BlockLoader::detect(),
        })
    }

    /// Feed data into the hash computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.phase == Phase::Finalized {
            return Err(CryptoError::InvalidState("update after finish"));
        }
        self.count = self
            .count
            .checked_add(data.len() as u64)
            .filter(|&n| n <= SM3_MAX_INPUT_LEN)
            .ok_or(CryptoError::InvalidLength(
                "total input exceeds the SM3 length field",
            ))?;
        self.phase = Phase::Absorbing;

        let mut input = data;

        // Top up a partially filled buffer first.
        if self.buffer_len > 0 {
            let take = (SM3_BLOCK_SIZE - self.buffer_len).min(input.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&input[..take]);
            self.buffer_len += take;
            input = &input[take..];

            if self.buffer_len < SM3_BLOCK_SIZE {
                return Ok(());
            }
            compress_blocks(&mut self.state, &self.buffer, self.loader);
            self.buffer_len = 0;
        }

        // Whole blocks straight from the input.
        let full = input.len() - input.len() % SM3_BLOCK_SIZE;
        compress_blocks(&mut self.state, &input[..full], self.loader);

        let rest = &input[full..];
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
        Ok(())
    }

    /// Finalize the hash and return the 32-byte digest.
    pub fn finish(&mut self) -> Result<[u8; SM3_OUTPUT_SIZE], CryptoError> {
        if self.phase == Phase::Finalized {
            return Err(CryptoError::InvalidState("finish called twice"));
        }

        // Residual bytes plus at most 72 bytes of padding span two blocks.
        let mut tail = [0u8; 2 * SM3_BLOCK_SIZE];
        let n = self.buffer_len;
        tail[..n].copy_from_slice(&self.buffer[..n]);
        let pad = pad::write_padding(self.count, &mut tail[n..]);
        compress_blocks(&mut self.state, &tail[..n + pad], self.loader);

        tail.zeroize();
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.phase = Phase::Finalized;
        Ok(self.state_bytes())
    }

    /// Return the digest of a finished context again.
    pub fn output(&self) -> Result<[u8; SM3_OUTPUT_SIZE], CryptoError> {
        if self.phase != Phase::Finalized {
            return Err(CryptoError::InvalidState("digest read before finish"));
        }
        Ok(self.state_bytes())
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.state = IV;
        self.count = 0;
        self.buffer.zeroize();
        self.buffer_len = 0;
        self.phase = Phase::Fresh;
    }

    /// Whether `finish` has been called since the last reset.
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    /// Total bytes accounted for so far, including any resumed prefix.
    pub fn processed_len(&self) -> u64 {
        self.count
    }

    /// One-shot: compute the SM3 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; SM3_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }

    fn state_bytes(&self) -> [u8; SM3_OUTPUT_SIZE] {
        let mut out = [0u8; SM3_OUTPUT_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    #[cfg(test)]
    fn with_loader(loader: BlockLoader) -> Self {
        let mut ctx = Self::new();
        ctx.loader = loader;
        ctx
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Digest for Sm3 {
    fn output_size(&self) -> usize {
        SM3_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        SM3_BLOCK_SIZE
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Sm3::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        if out.len() < SM3_OUTPUT_SIZE {
            return Err(CryptoError::BufferTooSmall {
                need: SM3_OUTPUT_SIZE,
                got: out.len(),
            });
        }
        let digest = Sm3::finish(self)?;
        out[..SM3_OUTPUT_SIZE].copy_from_slice(&digest);
        Ok(())
    }

    fn reset(&mut self) {
        Sm3::reset(self)
    }
}

/// Factory for boxed SM3 contexts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sm3Algorithm;

impl HashAlgorithm for Sm3Algorithm {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(Sm3::new())
    }
}

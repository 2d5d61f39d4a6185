//! Object-safe digest interface.
//!
//! `Sm3` implements [`Digest`] so the CLI, the integration tests and any
//! caller that only needs "bytes in, digest out" can drive it through
//! `Box<dyn Digest>`. Resumption from a chaining value is SM3-specific and
//! stays an inherent method on `Sm3`.

use sm3ext_types::CryptoError;

/// Streaming digest context behind a trait object.
pub trait Digest: Send + Sync {
    /// Digest length in bytes.
    fn output_size(&self) -> usize;

    /// Compression block length in bytes.
    fn block_size(&self) -> usize;

    /// Absorb more input. Fails once the context is finalized.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Write the digest into the front of `out`.
    ///
    /// Returns `BufferTooSmall` without touching the context when `out` is
    /// shorter than [`Digest::output_size`].
    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError>;

    /// Return to the initial state, discarding buffered input.
    fn reset(&mut self);
}

/// Factory for boxed [`Digest`] contexts.
pub trait HashAlgorithm: Send + Sync {
    fn new_digest(&self) -> Box<dyn Digest>;

    /// Hash `data` in one call and return the digest as a `Vec`.
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut ctx = self.new_digest();
        ctx.update(data)?;
        let mut out = vec![0u8; ctx.output_size()];
        ctx.finish(&mut out)?;
        Ok(out)
    }
}

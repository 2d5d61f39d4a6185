//! Length-extension forgery against SM3.
//!
//! A Merkle-Damgard digest is the full chaining state after the padded
//! message, so anyone holding `SM3(prefix)` and `|prefix|` can keep hashing:
//!
//! ```text
//! SM3(prefix || pad(|prefix|) || suffix)
//! ```
//!
//! is computable from the digest alone, without knowing `prefix`. This is why
//! `SM3(secret || message)` is not a MAC.
//!
//! The forger has to guess `|prefix|` exactly. A wrong length yields a
//! well-formed digest that simply does not match the honest computation;
//! nothing here can detect that.

use sm3ext_types::CryptoError;

use crate::sm3::{md_padding, padding_len, Sm3, SM3_OUTPUT_SIZE};

/// A forged digest together with the bytes that make it valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forgery {
    /// SM3 of `prefix || glue_padding || suffix`.
    pub digest: [u8; SM3_OUTPUT_SIZE],
    /// The padding the honest hasher appended to `prefix`.
    pub glue_padding: Vec<u8>,
    /// Attacker-chosen extension.
    pub suffix: Vec<u8>,
}

impl Forgery {
    /// Assemble the message to submit alongside the forged digest.
    ///
    /// `known` is the public tail of the original prefix (everything after
    /// the secret). The result is `known || glue_padding || suffix`; the
    /// verifier prepends the secret itself.
    pub fn forged_message(&self, known: &[u8]) -> Vec<u8> {
        let mut msg = Vec::with_capacity(known.len() + self.glue_padding.len() + self.suffix.len());
        msg.extend_from_slice(known);
        msg.extend_from_slice(&self.glue_padding);
        msg.extend_from_slice(&self.suffix);
        msg
    }

    /// Length in bytes of the full message the digest covers, secret included.
    pub fn extended_len(&self, prefix_len: u64) -> u64 {
        prefix_len
            .saturating_add(self.glue_padding.len() as u64)
            .saturating_add(self.suffix.len() as u64)
    }
}

/// Length-extension attack parameters: a leaked digest and the assumed byte
/// length of the message it was computed over.
#[derive(Clone, Debug)]
pub struct LengthExtension {
    leaked_digest: [u8; SM3_OUTPUT_SIZE],
    prefix_len: u64,
}

impl LengthExtension {
    pub fn new(leaked_digest: [u8; SM3_OUTPUT_SIZE], prefix_len: u64) -> Self {
        Self {
            leaked_digest,
            prefix_len,
        }
    }

    pub fn prefix_len(&self) -> u64 {
        self.prefix_len
    }

    /// Padding the honest hasher appended to the original message.
    pub fn glue_padding(&self) -> Vec<u8> {
        md_padding(self.prefix_len)
    }

    /// Number of bytes already compressed into the leaked digest.
    pub fn resumed_len(&self) -> Result<u64, CryptoError> {
        self.prefix_len
            .checked_add(padding_len(self.prefix_len) as u64)
            .ok_or(CryptoError::InvalidLength("prefix length overflows"))
    }

    /// Forge the digest of `prefix || glue_padding || suffix`.
    pub fn extend(&self, suffix: &[u8]) -> Result<Forgery, CryptoError> {
        let resumed_len = self.resumed_len()?;
        let glue_padding = self.glue_padding();
        log::debug!(
            "lext: prefix {} bytes, glue {} bytes, suffix {} bytes",
            self.prefix_len,
            glue_padding.len(),
            suffix.len()
        );

        let mut ctx = Sm3::resume(&self.leaked_digest, resumed_len)?;
        ctx.update(suffix)?;
        let digest = ctx.finish()?;

        Ok(Forgery {
            digest,
            glue_padding,
            suffix: suffix.to_vec(),
        })
    }
}

/// Forge `SM3(prefix || pad(prefix_len) || suffix)` from `SM3(prefix)`.
pub fn forge(
    leaked_digest: &[u8; SM3_OUTPUT_SIZE],
    prefix_len: u64,
    suffix: &[u8],
) -> Result<[u8; SM3_OUTPUT_SIZE], CryptoError> {
    LengthExtension::new(*leaked_digest, prefix_len)
        .extend(suffix)
        .map(|f| f.digest)
}

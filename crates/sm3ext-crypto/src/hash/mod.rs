//! Unified hash module.
//!
//! Re-exports the provider traits together with the SM3 implementation so
//! callers have a single entry point for digest computation.

pub use crate::provider::{Digest, HashAlgorithm};

#[cfg(feature = "sm3")]
pub use crate::sm3::{Sm3, Sm3Algorithm};

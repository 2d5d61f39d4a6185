#![forbid(unsafe_code)]
#![doc = "Utility functions for sm3ext: hex encoding."]

#[cfg(feature = "hex")]
pub mod hex;

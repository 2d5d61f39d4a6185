#![forbid(unsafe_code)]
#![doc = "Common error types for sm3ext."]

pub mod error;

pub use error::*;

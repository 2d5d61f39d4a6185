#![doc = "SM3 hashing and Merkle-Damgard length-extension forgery for sm3ext."]

// Core traits
pub mod provider;

// Hash algorithms
#[cfg(feature = "sm3")]
pub mod sm3;

pub mod hash;

// Length extension
#[cfg(feature = "lext")]
pub mod lext;

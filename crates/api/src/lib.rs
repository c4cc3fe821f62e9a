//! Public API traits and types for the keywheel library
//!
//! This crate provides the public API surface for the keywheel ecosystem:
//! the key-manager contract implemented per key type, the object-safe
//! primitive traits (sign, verify, AEAD), and the common types describing
//! templates, key material, and output framing.

#![cfg_attr(not(feature = "std"), no_std)]

// Templates, payloads, and error messages are heap-allocated, so the crate
// always needs alloc even without std.
#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use types::*;

// Re-export all traits from the traits module
pub use traits::{Aead, KeyManager, Primitive, Signer, Verifier};

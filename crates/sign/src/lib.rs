//! Signature primitives for keywheel
//!
//! Provides the rotation-aware signer/verifier wrappers over a primitive
//! set, plus concrete Ed25519 key managers backed by `ed25519-dalek`.

pub mod ed25519;
pub mod wrapper;

pub use ed25519::{
    ed25519_template, Ed25519KeyManager, Ed25519PublicKeyManager, ED25519_PUBLIC_TYPE_ID,
    ED25519_TYPE_ID,
};
pub use wrapper::{WrappedSigner, WrappedVerifier};

//! Trait definitions for the keywheel ecosystem
//!
//! Two layers live here: the object-safe primitive traits that application
//! code calls (sign, verify, AEAD), and the key-manager contract that every
//! key type implements so the registry can generate, validate, and wrap
//! keys of that type.

pub mod manager;
pub mod primitive;

pub use manager::KeyManager;
pub use primitive::{Aead, Primitive, Signer, Verifier};

//! AEAD primitives for keywheel
//!
//! Provides the rotation-aware AEAD wrapper over a primitive set, plus
//! concrete key managers for XChaCha20-Poly1305 and AES-GCM.
//!
//! Every ciphertext is self-contained: the key-identifying output prefix,
//! then the random nonce, then the ciphertext with its authentication tag.

pub mod aes_gcm;
pub mod wrapper;
pub mod xchacha20poly1305;

pub use crate::aes_gcm::{
    aes128_gcm_template, aes256_gcm_template, AesGcmKeyManager, AES_GCM_TYPE_ID,
};
pub use wrapper::WrappedAead;
pub use xchacha20poly1305::{
    xchacha20poly1305_template, XChaCha20Poly1305KeyManager, XCHACHA20_POLY1305_TYPE_ID,
};

//! # keywheel
//!
//! A rotation-aware key-management layer. Callers describe *what kind of
//! key* they want with a [`KeyTemplate`](api::KeyTemplate); the registry
//! generates and validates the key material; and one or more keys, across
//! rotation generations, are wrapped into a single callable primitive
//! whose outputs are framed with a prefix identifying the producing key.
//!
//! ## Usage
//!
//! ```
//! use keywheel::prelude::*;
//! use rand::rngs::OsRng;
//!
//! fn rotate_and_verify() -> keywheel::api::Result<()> {
//!     let registry = keywheel::default_registry()?;
//!     let mut keyset = Keyset::new();
//!     keyset.generate(&registry, &ed25519_template(OutputPrefixKind::Tink), &mut OsRng)?;
//!
//!     let signer = WrappedSigner::for_keyset(&registry, &keyset)?;
//!     let signature = signer.sign(b"message")?;
//!
//!     // Rotating keeps old signatures verifiable.
//!     keyset.rotate(&registry, &ed25519_template(OutputPrefixKind::Tink), &mut OsRng)?;
//!     let verifier = WrappedVerifier::for_keyset(&registry, &keyset)?;
//!     verifier.verify(b"message", &signature)
//! }
//!
//! rotate_and_verify().expect("round trip failed");
//! ```
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - [`keywheel-api`]: traits and types (key managers, primitives, errors)
//! - [`keywheel-core`]: registry, keysets, and primitive-set assembly
//! - [`keywheel-sign`]: signature wrapping and Ed25519 key managers
//! - [`keywheel-aead`]: AEAD wrapping and XChaCha20-Poly1305 / AES-GCM
//!   key managers
//!
//! [`keywheel-api`]: keywheel_api
//! [`keywheel-core`]: keywheel_core
//! [`keywheel-sign`]: keywheel_sign
//! [`keywheel-aead`]: keywheel_aead

// Core re-exports (always available)
pub use keywheel_api as api;
pub use keywheel_core as core;

// Feature-gated re-exports
#[cfg(feature = "sign")]
pub use keywheel_sign as sign;

#[cfg(feature = "aead")]
pub use keywheel_aead as aead;

use std::sync::Arc;

use keywheel_api::Result;
use keywheel_core::Registry;

/// A registry with every key manager shipped by the enabled features
///
/// # Errors
///
/// Propagates registration errors, which cannot occur for a freshly
/// created registry.
pub fn default_registry() -> Result<Registry> {
    let registry = Registry::new();
    #[cfg(feature = "sign")]
    {
        registry.register(Arc::new(keywheel_sign::Ed25519KeyManager::new()))?;
        registry.register(Arc::new(keywheel_sign::Ed25519PublicKeyManager::new()))?;
    }
    #[cfg(feature = "aead")]
    {
        registry.register(Arc::new(keywheel_aead::XChaCha20Poly1305KeyManager::new()))?;
        registry.register(Arc::new(keywheel_aead::AesGcmKeyManager::new()))?;
    }
    Ok(registry)
}

/// Common imports for keywheel users
pub mod prelude {
    pub use keywheel_api::{
        Aead, Error, KeyManager, KeyStatus, KeyTemplate, KeyTypeId, OutputPrefixKind, Primitive,
        PrimitiveKind, Result, Signer, Verifier,
    };
    pub use keywheel_core::{Keyset, PrimitiveSet, Registry};

    #[cfg(feature = "sign")]
    pub use keywheel_sign::{ed25519_template, WrappedSigner, WrappedVerifier};

    #[cfg(feature = "aead")]
    pub use keywheel_aead::{
        aes128_gcm_template, aes256_gcm_template, xchacha20poly1305_template, WrappedAead,
    };
}

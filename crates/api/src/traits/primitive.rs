//! Object-safe primitive traits and the tagged primitive union
//!
//! Primitives are the runtime objects application code calls. They are
//! `Send + Sync` so an assembled primitive set can be shared freely across
//! threads; every call is independent and re-entrant.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, format, vec::Vec};

use crate::error::{Error, Result};
use crate::types::PrimitiveKind;

/// Produces signatures over messages
pub trait Signer: Send + Sync {
    /// Sign a message, returning the raw (unframed) signature bytes
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Checks signatures over messages
pub trait Verifier: Send + Sync {
    /// Verify a raw (unframed) signature over a message
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` or `Other` when the signature does not verify;
    /// callers on the fan-out path discard the specific reason.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()>;
}

/// Authenticated encryption with associated data
pub trait Aead: Send + Sync {
    /// Encrypt a plaintext, binding the associated data
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a ciphertext produced by [`Aead::encrypt`]
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;
}

/// A runtime primitive tagged by the role it serves
///
/// Key managers return this union from
/// [`KeyManager::primitive`](crate::traits::KeyManager::primitive); the
/// wrapper for a given role extracts the matching variant.
pub enum Primitive {
    /// Signing primitive
    Signer(Box<dyn Signer>),
    /// Verification primitive
    Verifier(Box<dyn Verifier>),
    /// AEAD primitive (serves both encrypt and decrypt)
    Aead(Box<dyn Aead>),
}

impl Primitive {
    /// The role this primitive serves
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Signer(_) => PrimitiveKind::Sign,
            Primitive::Verifier(_) => PrimitiveKind::Verify,
            Primitive::Aead(_) => PrimitiveKind::Aead,
        }
    }

    /// Extract the signing primitive
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRole` if this primitive serves another role.
    pub fn into_signer(self) -> Result<Box<dyn Signer>> {
        match self {
            Primitive::Signer(s) => Ok(s),
            other => Err(role_mismatch(PrimitiveKind::Sign, other.kind())),
        }
    }

    /// Extract the verification primitive
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRole` if this primitive serves another role.
    pub fn into_verifier(self) -> Result<Box<dyn Verifier>> {
        match self {
            Primitive::Verifier(v) => Ok(v),
            other => Err(role_mismatch(PrimitiveKind::Verify, other.kind())),
        }
    }

    /// Extract the AEAD primitive
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRole` if this primitive serves another role.
    pub fn into_aead(self) -> Result<Box<dyn Aead>> {
        match self {
            Primitive::Aead(a) => Ok(a),
            other => Err(role_mismatch(PrimitiveKind::Aead, other.kind())),
        }
    }
}

impl core::fmt::Debug for Primitive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Primitive({})", self.kind())
    }
}

fn role_mismatch(requested: PrimitiveKind, actual: PrimitiveKind) -> Error {
    Error::UnsupportedRole {
        requested,
        message: format!("primitive serves role '{}'", actual),
    }
}

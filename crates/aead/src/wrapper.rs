//! Rotation-aware AEAD wrapper
//!
//! One wrapped object serves both directions: encryption always uses the
//! primary key and frames the ciphertext with its prefix; decryption finds
//! the producing key by prefix, falling back to trying raw keys blind.

use keywheel_api::{Aead, Error, Primitive, PrimitiveKind, Result};
use keywheel_core::{AssemblyWarning, Keyset, PrimitiveSet, Registry};

/// AEAD over a keyset: primary-key encryption, any-key decryption
pub struct WrappedAead {
    set: PrimitiveSet<Box<dyn Aead>>,
}

impl WrappedAead {
    /// Assemble an AEAD over the keyset's enabled keys
    ///
    /// Uses the keyset's primary for encryption. A keyset without a
    /// primary still assembles; the result is decrypt-only.
    ///
    /// # Errors
    ///
    /// Propagates assembly errors (`DuplicatePrefix`, a failing primary).
    pub fn for_keyset(registry: &Registry, keyset: &Keyset) -> Result<Self> {
        let set = PrimitiveSet::assemble(
            registry,
            keyset.records(),
            keyset.primary_id(),
            PrimitiveKind::Aead,
            Primitive::into_aead,
        )?;
        Ok(Self { set })
    }

    /// Non-fatal assembly warnings for keys omitted from the set
    pub fn warnings(&self) -> &[AssemblyWarning] {
        self.set.warnings()
    }
}

impl Aead for WrappedAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let primary = self.set.primary().ok_or_else(|| Error::PrimaryKeyUnavailable {
            key_id: None,
            message: "encryption requires a primary key".into(),
        })?;
        let raw = primary.primitive().encrypt(plaintext, associated_data)?;
        let mut framed = Vec::with_capacity(primary.prefix().len() + raw.len());
        framed.extend_from_slice(primary.prefix());
        framed.extend_from_slice(&raw);
        Ok(framed)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        for (entry, raw_ciphertext) in self.set.candidates(ciphertext) {
            if let Ok(plaintext) = entry.primitive().decrypt(raw_ciphertext, associated_data) {
                return Ok(plaintext);
            }
        }
        Err(Error::NoMatchingKey)
    }
}

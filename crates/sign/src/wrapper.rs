//! Rotation-aware signer and verifier wrappers
//!
//! The signer frames every signature with the primary key's output prefix;
//! the verifier strips the prefix to find the matching key, falling back to
//! trying raw keys blind. Both are stateless after construction and safe to
//! share across threads.

use keywheel_api::{Error, Primitive, PrimitiveKind, Result, Signer, Verifier};
use keywheel_core::{AssemblyWarning, Keyset, PrimitiveSet, Registry};

/// Signs with the keyset's primary key, framing the output
///
/// Exactly one underlying signature is computed per call; the primary's
/// precomputed prefix is prepended to it (nothing for raw keys).
pub struct WrappedSigner {
    set: PrimitiveSet<Box<dyn Signer>>,
}

impl WrappedSigner {
    /// Assemble a signer over the keyset's enabled keys
    ///
    /// # Errors
    ///
    /// Fails with `PrimaryKeyUnavailable` when the keyset has no usable
    /// primary, and propagates assembly errors (`DuplicatePrefix`, key
    /// manager failures on the primary).
    pub fn for_keyset(registry: &Registry, keyset: &Keyset) -> Result<Self> {
        let set = PrimitiveSet::assemble(
            registry,
            keyset.records(),
            keyset.primary_id(),
            PrimitiveKind::Sign,
            Primitive::into_signer,
        )?;
        if set.primary().is_none() {
            return Err(Error::PrimaryKeyUnavailable {
                key_id: None,
                message: "signing requires a primary key".into(),
            });
        }
        Ok(Self { set })
    }

    /// Non-fatal assembly warnings for keys omitted from the set
    pub fn warnings(&self) -> &[AssemblyWarning] {
        self.set.warnings()
    }
}

impl Signer for WrappedSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let primary = self.set.primary().ok_or_else(|| Error::PrimaryKeyUnavailable {
            key_id: None,
            message: "set has no primary entry".into(),
        })?;
        let raw = primary.primitive().sign(message)?;
        let mut framed = Vec::with_capacity(primary.prefix().len() + raw.len());
        framed.extend_from_slice(primary.prefix());
        framed.extend_from_slice(&raw);
        Ok(framed)
    }
}

/// Verifies against any key in the set, prefix match first
pub struct WrappedVerifier {
    set: PrimitiveSet<Box<dyn Verifier>>,
}

impl WrappedVerifier {
    /// Assemble a verifier over the keyset's enabled keys
    ///
    /// No primary is required; every enabled key is a lookup candidate.
    ///
    /// # Errors
    ///
    /// Propagates assembly errors such as `DuplicatePrefix`.
    pub fn for_keyset(registry: &Registry, keyset: &Keyset) -> Result<Self> {
        let set = PrimitiveSet::assemble(
            registry,
            keyset.records(),
            None,
            PrimitiveKind::Verify,
            Primitive::into_verifier,
        )?;
        Ok(Self { set })
    }

    /// Non-fatal assembly warnings for keys omitted from the set
    pub fn warnings(&self) -> &[AssemblyWarning] {
        self.set.warnings()
    }
}

impl Verifier for WrappedVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        for (entry, raw_signature) in self.set.candidates(signature) {
            if entry.primitive().verify(message, raw_signature).is_ok() {
                return Ok(());
            }
        }
        // One aggregate error regardless of how many keys were tried or
        // why each one failed.
        Err(Error::NoMatchingKey)
    }
}

//! The key-manager contract implemented per key type
//!
//! A key manager owns everything type-specific: interpreting format
//! parameters, generating payload bytes, and turning stored payloads into
//! runtime primitives. The registry and the primitive-set machinery treat
//! payloads and format parameters as opaque and only ever dispatch through
//! this trait.

use rand_core::CryptoRngCore;

use crate::error::Result;
use crate::traits::Primitive;
use crate::types::{KeyBytes, KeyTypeId, PrimitiveKind};

/// Per-key-type logic for generation, validation, and primitive construction
///
/// Implementations must be safe to call concurrently from multiple threads;
/// `new_key` calls with independent RNGs produce independent results.
pub trait KeyManager: Send + Sync {
    /// The type identifier this manager owns
    fn type_id(&self) -> &KeyTypeId;

    /// Declared identity of the implementation, e.g. `"ed25519-dalek/1"`
    ///
    /// Registering the same `(type_id, implementation_id)` pair twice is a
    /// no-op; a different implementation id under an existing type id is
    /// rejected. Object identity plays no part in this comparison.
    fn implementation_id(&self) -> &'static str;

    /// Roles this manager can build primitives for
    fn supported_kinds(&self) -> &[PrimitiveKind];

    /// Validate format parameters without side effects
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for malformed or out-of-range parameters.
    fn validate_format(&self, format: &[u8]) -> Result<()>;

    /// Generate fresh key payload bytes for the given format parameters
    ///
    /// The caller supplies the entropy source; implementations must not
    /// fall back to an ambient one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for bad parameters and `GenerationFailed`
    /// when key creation itself fails.
    fn new_key(&self, format: &[u8], rng: &mut dyn CryptoRngCore) -> Result<KeyBytes>;

    /// Convert stored payload bytes into a runtime primitive for a role
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for corrupt or mismatched payloads and
    /// `UnsupportedRole` for roles outside [`KeyManager::supported_kinds`].
    fn primitive(&self, payload: &KeyBytes, kind: PrimitiveKind) -> Result<Primitive>;

    /// Whether this manager serves the given role
    fn supports(&self, kind: PrimitiveKind) -> bool {
        self.supported_kinds().contains(&kind)
    }
}

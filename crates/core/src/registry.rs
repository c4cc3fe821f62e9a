//! The key-type registry
//!
//! An explicit, lifecycle-scoped instance rather than ambient global state:
//! callers construct one registry, populate it at initialization, and
//! thread it through keyset generation and primitive-set assembly.
//!
//! Registration swaps in a fully-built snapshot map under a write lock, so
//! readers never observe a partially-registered manager; lookups clone an
//! `Arc` and run lock-free against the snapshot they obtained.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rand_core::CryptoRngCore;

use keywheel_api::{
    Error, KeyManager, KeyMaterial, KeyStatus, KeyTemplate, KeyTypeId, Primitive, PrimitiveKind,
    Result,
};
use keywheel_api::KeyId;

type ManagerMap = HashMap<KeyTypeId, Arc<dyn KeyManager>>;

/// Process-scoped mapping from key type identifier to its key manager
pub struct Registry {
    managers: RwLock<Arc<ManagerMap>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            managers: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Bind a key manager to its type identifier
    ///
    /// Idempotent when the same `(type_id, implementation_id)` pair is
    /// registered again; a different implementation under an existing type
    /// id is rejected and the original stays active.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` on a conflicting registration.
    pub fn register(&self, manager: Arc<dyn KeyManager>) -> Result<()> {
        let mut guard = self
            .managers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = guard.get(manager.type_id()) {
            if existing.implementation_id() == manager.implementation_id() {
                return Ok(());
            }
            return Err(Error::AlreadyRegistered {
                type_id: manager.type_id().as_str().into(),
            });
        }
        let mut next: ManagerMap = (**guard).clone();
        next.insert(manager.type_id().clone(), manager);
        *guard = Arc::new(next);
        Ok(())
    }

    /// Find the key manager bound to a type identifier
    ///
    /// # Errors
    ///
    /// Returns `UnknownKeyType` when nothing is registered under the id.
    pub fn lookup(&self, type_id: &KeyTypeId) -> Result<Arc<dyn KeyManager>> {
        self.snapshot()
            .get(type_id)
            .cloned()
            .ok_or_else(|| Error::UnknownKeyType {
                type_id: type_id.as_str().into(),
            })
    }

    /// Generate a new key material record from a template
    ///
    /// Validates the format parameters, generates the payload through the
    /// matching key manager, and draws a random nonzero key id from the
    /// supplied RNG. The registry is stateless with respect to key ids;
    /// uniqueness within a keyset is enforced by the keyset owner.
    ///
    /// # Errors
    ///
    /// Propagates `UnknownKeyType`, `InvalidFormat`, and
    /// `GenerationFailed` unchanged from the lookup and the key manager.
    pub fn new_key_material(
        &self,
        template: &KeyTemplate,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<KeyMaterial> {
        let manager = self.lookup(&template.type_id)?;
        manager.validate_format(&template.format)?;
        let payload = manager.new_key(&template.format, rng)?;
        let key_id = random_key_id(rng);
        Ok(KeyMaterial::new(
            template.type_id.clone(),
            key_id,
            KeyStatus::Enabled,
            template.prefix_kind,
            payload,
        ))
    }

    /// Build a runtime primitive from a stored record for the given role
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRole` when the record's manager does not serve
    /// the role, and propagates `InvalidKey` from the conversion.
    pub fn primitive_for(&self, record: &KeyMaterial, kind: PrimitiveKind) -> Result<Primitive> {
        let manager = self.lookup(record.type_id())?;
        if !manager.supports(kind) {
            return Err(Error::UnsupportedRole {
                requested: kind,
                message: format!("key type '{}' does not serve this role", record.type_id()),
            });
        }
        manager.primitive(record.payload(), kind)
    }

    /// Type identifiers with a registered manager, in no particular order
    pub fn registered_type_ids(&self) -> Vec<KeyTypeId> {
        self.snapshot().keys().cloned().collect()
    }

    fn snapshot(&self) -> Arc<ManagerMap> {
        self.managers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.registered_type_ids())
            .finish()
    }
}

// Key id 0 is reserved so serialized forms can use it as "unset".
fn random_key_id(rng: &mut dyn CryptoRngCore) -> KeyId {
    loop {
        let id = rng.next_u32();
        if id != 0 {
            return KeyId(id);
        }
    }
}

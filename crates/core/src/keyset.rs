//! Keyset ownership: ordered key material plus a designated primary
//!
//! The keyset is the uniqueness scope for key ids and the only place a
//! record's status ever changes. Status transitions replace the record
//! wholesale (same id, new status); destroyed ids stay reserved as
//! tombstones so an id is never reused for different payload within the
//! keyset's lifetime. Concurrent transitions on one keyset must be
//! serialized by whoever owns it.

use rand_core::CryptoRngCore;

use keywheel_api::{Error, KeyId, KeyMaterial, KeyStatus, KeyTemplate, Result};

use crate::registry::Registry;

// Bound on id-collision retries before generation gives up.
const MAX_ID_ATTEMPTS: usize = 32;

/// An ordered collection of key material records with one primary
#[derive(Debug, Default)]
pub struct Keyset {
    records: Vec<KeyMaterial>,
    primary: Option<KeyId>,
}

impl Keyset {
    /// Create an empty keyset
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new key from a template and append it
    ///
    /// The new key is enabled. The first key generated into an empty
    /// keyset becomes the primary; later keys do not change the primary
    /// (use [`Keyset::rotate`] for that). Key ids are drawn at random and
    /// re-drawn on collision, destroyed tombstones included.
    ///
    /// # Errors
    ///
    /// Propagates registry and key-manager errors; returns
    /// `GenerationFailed` if no unused key id is found within the retry
    /// bound.
    pub fn generate(
        &mut self,
        registry: &Registry,
        template: &KeyTemplate,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<KeyId> {
        let mut record = registry.new_key_material(template, rng)?;
        let mut attempts = 1;
        while self.contains(record.key_id()) {
            if attempts == MAX_ID_ATTEMPTS {
                return Err(Error::GenerationFailed {
                    context: "Keyset::generate",
                    message: "could not draw an unused key id".into(),
                });
            }
            record = registry.new_key_material(template, rng)?;
            attempts += 1;
        }
        let key_id = record.key_id();
        self.records.push(record);
        if self.primary.is_none() {
            self.primary = Some(key_id);
        }
        Ok(key_id)
    }

    /// Generate a new key and promote it to primary
    ///
    /// The previous primary stays enabled, so outputs produced under it
    /// remain verifiable/decryptable until it is disabled or destroyed.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Keyset::generate`].
    pub fn rotate(
        &mut self,
        registry: &Registry,
        template: &KeyTemplate,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<KeyId> {
        let key_id = self.generate(registry, template, rng)?;
        self.primary = Some(key_id);
        Ok(key_id)
    }

    /// Designate an existing enabled key as the primary
    ///
    /// # Errors
    ///
    /// Returns `PrimaryKeyUnavailable` if the key is absent or not enabled.
    pub fn set_primary(&mut self, key_id: KeyId) -> Result<()> {
        match self.record(key_id) {
            Some(r) if r.status().is_enabled() => {
                self.primary = Some(key_id);
                Ok(())
            }
            Some(r) => Err(Error::PrimaryKeyUnavailable {
                key_id: Some(key_id),
                message: format!("status is {}", r.status()),
            }),
            None => Err(Error::PrimaryKeyUnavailable {
                key_id: Some(key_id),
                message: "not present in the keyset".into(),
            }),
        }
    }

    /// Re-enable a disabled key
    ///
    /// # Errors
    ///
    /// Fails for unknown ids and for destroyed keys, which can never be
    /// resurrected.
    pub fn enable(&mut self, key_id: KeyId) -> Result<()> {
        self.transition(key_id, KeyStatus::Enabled)
    }

    /// Disable a key, excluding it from future primitive sets
    ///
    /// # Errors
    ///
    /// The primary cannot be disabled; promote another key first.
    pub fn disable(&mut self, key_id: KeyId) -> Result<()> {
        self.guard_not_primary(key_id, "disable")?;
        self.transition(key_id, KeyStatus::Disabled)
    }

    /// Destroy a key's payload, keeping its id as a tombstone
    ///
    /// # Errors
    ///
    /// The primary cannot be destroyed; promote another key first.
    pub fn destroy(&mut self, key_id: KeyId) -> Result<()> {
        self.guard_not_primary(key_id, "destroy")?;
        self.transition(key_id, KeyStatus::Destroyed)
    }

    /// The designated primary key id, if any
    pub fn primary_id(&self) -> Option<KeyId> {
        self.primary
    }

    /// All records in generation order, tombstones included
    pub fn records(&self) -> &[KeyMaterial] {
        &self.records
    }

    /// The record with the given id
    pub fn record(&self, key_id: KeyId) -> Option<&KeyMaterial> {
        self.records.iter().find(|r| r.key_id() == key_id)
    }

    /// Whether an id is taken, destroyed tombstones included
    pub fn contains(&self, key_id: KeyId) -> bool {
        self.record(key_id).is_some()
    }

    /// Number of records, tombstones included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the keyset holds no records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn guard_not_primary(&self, key_id: KeyId, action: &'static str) -> Result<()> {
        if self.primary == Some(key_id) {
            return Err(Error::Other {
                context: action,
                message: format!("key {} is the primary; promote another key first", key_id),
            });
        }
        Ok(())
    }

    fn transition(&mut self, key_id: KeyId, status: KeyStatus) -> Result<()> {
        let position = self
            .records
            .iter()
            .position(|r| r.key_id() == key_id)
            .ok_or_else(|| Error::InvalidKey {
                context: "Keyset::transition",
                message: format!("no key with id {}", key_id),
            })?;
        self.records[position] = self.records[position].transition(status)?;
        Ok(())
    }
}

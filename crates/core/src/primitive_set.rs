//! Primitive-set assembly and prefix-indexed lookup
//!
//! A primitive set combines the enabled keys of a keyset, possibly spanning
//! several rotation generations, into one immutable bundle: each entry
//! carries its precomputed output prefix and wrapped primitive instance, a
//! prefix index serves the verify/decrypt path, and an optional designated
//! primary serves the compute path. Once assembled, a set never changes and
//! is safely shared by unlimited concurrent readers.

use std::collections::HashMap;
use std::sync::Arc;

use keywheel_api::{
    Error, KeyId, KeyMaterial, KeyStatus, OutputPrefixKind, Primitive, PrimitiveKind, Result,
};

use crate::prefix::{output_prefix, PREFIX_LEN};
use crate::registry::Registry;

/// One enabled key inside a primitive set
pub struct Entry<P> {
    key_id: KeyId,
    prefix: Vec<u8>,
    prefix_kind: OutputPrefixKind,
    status: KeyStatus,
    primitive: P,
}

impl<P> Entry<P> {
    /// Keyset-scoped identifier of the underlying key
    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    /// Precomputed framing prefix (empty for raw keys)
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Framing kind of the underlying key
    pub fn prefix_kind(&self) -> OutputPrefixKind {
        self.prefix_kind
    }

    /// Status of the underlying record at assembly time
    pub fn status(&self) -> KeyStatus {
        self.status
    }

    /// The wrapped primitive instance
    pub fn primitive(&self) -> &P {
        &self.primitive
    }
}

/// Non-fatal failure recorded during assembly
///
/// A non-primary key whose primitive could not be constructed is omitted
/// from the set; the omission is surfaced here rather than hidden.
#[derive(Debug, Clone)]
pub struct AssemblyWarning {
    /// The key that failed to wrap
    pub key_id: KeyId,
    /// Why it failed
    pub error: Error,
}

/// Immutable, prefix-indexed collection of wrapped keys
///
/// Assembled once from a keyset's enabled records; disabled and destroyed
/// records never appear. At most one entry exists per distinct non-empty
/// prefix; raw entries coexist with prefixed ones and are tried last on
/// the lookup path.
pub struct PrimitiveSet<P> {
    entries: Vec<Arc<Entry<P>>>,
    by_prefix: HashMap<Vec<u8>, Arc<Entry<P>>>,
    raw: Vec<Arc<Entry<P>>>,
    primary: Option<Arc<Entry<P>>>,
    warnings: Vec<AssemblyWarning>,
}

impl<P> PrimitiveSet<P> {
    /// Assemble a set from ordered key material records
    ///
    /// `primary` designates the compute-path key; `None` produces a
    /// lookup-only set (verify/decrypt). `extract` narrows the registry's
    /// tagged [`Primitive`] to the concrete capability `P` for this set.
    ///
    /// Non-primary keys that fail to wrap are recorded as warnings and
    /// omitted; a failing, missing, or non-enabled primary aborts assembly.
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePrefix` when two enabled records compute the same
    /// non-empty prefix and `PrimaryKeyUnavailable` when the designated
    /// primary cannot anchor the set.
    pub fn assemble<F>(
        registry: &Registry,
        records: &[KeyMaterial],
        primary: Option<KeyId>,
        kind: PrimitiveKind,
        extract: F,
    ) -> Result<Self>
    where
        F: Fn(Primitive) -> Result<P>,
    {
        let enabled: Vec<&KeyMaterial> = records
            .iter()
            .filter(|r| r.status().is_enabled())
            .collect();

        // Keyset integrity check before any wrapping happens: two enabled
        // keys claiming the same non-empty prefix means colliding ids.
        let mut seen_prefixes: HashMap<Vec<u8>, KeyId> = HashMap::new();
        for record in &enabled {
            let prefix = output_prefix(record.prefix_kind(), record.key_id());
            if prefix.is_empty() {
                continue;
            }
            if seen_prefixes.insert(prefix, record.key_id()).is_some() {
                return Err(Error::DuplicatePrefix {
                    key_id: record.key_id(),
                });
            }
        }

        if let Some(primary_id) = primary {
            let designated = enabled.iter().find(|r| r.key_id() == primary_id);
            if designated.is_none() {
                return Err(Error::PrimaryKeyUnavailable {
                    key_id: Some(primary_id),
                    message: "not present in the keyset or not enabled".into(),
                });
            }
        }

        let mut entries = Vec::with_capacity(enabled.len());
        let mut by_prefix = HashMap::new();
        let mut raw = Vec::new();
        let mut primary_entry = None;
        let mut warnings = Vec::new();

        for record in enabled {
            let is_primary = primary == Some(record.key_id());
            let primitive = match registry
                .primitive_for(record, kind)
                .and_then(&extract)
            {
                Ok(p) => p,
                Err(error) if is_primary => {
                    return Err(Error::PrimaryKeyUnavailable {
                        key_id: Some(record.key_id()),
                        message: error.to_string(),
                    });
                }
                Err(error) => {
                    warnings.push(AssemblyWarning {
                        key_id: record.key_id(),
                        error,
                    });
                    continue;
                }
            };

            let entry = Arc::new(Entry {
                key_id: record.key_id(),
                prefix: output_prefix(record.prefix_kind(), record.key_id()),
                prefix_kind: record.prefix_kind(),
                status: record.status(),
                primitive,
            });

            if entry.prefix.is_empty() {
                raw.push(entry.clone());
            } else {
                by_prefix.insert(entry.prefix.clone(), entry.clone());
            }
            if is_primary && primary_entry.is_none() {
                primary_entry = Some(entry.clone());
            }
            entries.push(entry);
        }

        Ok(Self {
            entries,
            by_prefix,
            raw,
            primary: primary_entry,
            warnings,
        })
    }

    /// The designated compute-path entry, if any
    pub fn primary(&self) -> Option<&Entry<P>> {
        self.primary.as_deref()
    }

    /// Entry whose non-empty prefix equals `prefix` exactly
    pub fn entry_for_prefix(&self, prefix: &[u8]) -> Option<&Entry<P>> {
        self.by_prefix.get(prefix).map(AsRef::as_ref)
    }

    /// Raw-prefixed entries, in set order
    pub fn raw_entries(&self) -> impl Iterator<Item = &Entry<P>> {
        self.raw.iter().map(AsRef::as_ref)
    }

    /// All entries, in set order
    pub fn entries(&self) -> impl Iterator<Item = &Entry<P>> {
        self.entries.iter().map(AsRef::as_ref)
    }

    /// Candidate entries for an input on the lookup path
    ///
    /// Yields `(entry, payload)` pairs in trial order: the entry matching
    /// the input's leading prefix bytes first (with the prefix stripped
    /// from the payload), then every raw entry in set order with the whole
    /// input. Raw keys carry no identifying marker and must be tried
    /// blind; inputs shorter than a prefix go straight to the raw
    /// fallback.
    pub fn candidates<'s, 'i>(
        &'s self,
        input: &'i [u8],
    ) -> impl Iterator<Item = (&'s Entry<P>, &'i [u8])> {
        let prefixed = if input.len() >= PREFIX_LEN {
            self.by_prefix
                .get(&input[..PREFIX_LEN])
                .map(|entry| (entry.as_ref(), &input[PREFIX_LEN..]))
        } else {
            None
        };
        prefixed
            .into_iter()
            .chain(self.raw.iter().map(move |entry| (entry.as_ref(), input)))
    }

    /// Warnings recorded for omitted non-primary entries
    pub fn warnings(&self) -> &[AssemblyWarning] {
        &self.warnings
    }

    /// Number of usable entries in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set contains no usable entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P> core::fmt::Debug for PrimitiveSet<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrimitiveSet")
            .field("entries", &self.entries.len())
            .field("raw", &self.raw.len())
            .field("primary", &self.primary.as_ref().map(|e| e.key_id))
            .field("warnings", &self.warnings.len())
            .finish()
    }
}

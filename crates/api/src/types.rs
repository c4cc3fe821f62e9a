//! Core types for the keywheel library
//!
//! This module defines the value types shared by the registry, the keyset
//! layer, and the primitive-set machinery: key identifiers, templates,
//! status, output-prefix kinds, and the zeroizing payload buffer.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// Numeric identifier of a key within a keyset
///
/// Assigned at generation time and never reused for a different payload
/// within the same keyset's lifetime, destroyed keys included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyId(pub u32);

impl KeyId {
    /// Big-endian wire encoding of the identifier
    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Decode from the big-endian wire encoding
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque, globally unique name of a key's algorithm family
///
/// Examples: `"signature/ed25519"`, `"aead/xchacha20poly1305"`. At most one
/// key manager is registered per identifier for the lifetime of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyTypeId(String);

impl KeyTypeId {
    /// Create a type identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyTypeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lifecycle status of a key material record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyStatus {
    /// The key participates in compute and lookup operations
    Enabled,
    /// The key is retained but excluded from all primitive sets
    Disabled,
    /// The payload is gone; the identifier remains as a tombstone
    Destroyed,
}

impl KeyStatus {
    /// Whether this status admits the key into a primitive set
    pub fn is_enabled(self) -> bool {
        matches!(self, KeyStatus::Enabled)
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStatus::Enabled => f.write_str("enabled"),
            KeyStatus::Disabled => f.write_str("disabled"),
            KeyStatus::Destroyed => f.write_str("destroyed"),
        }
    }
}

/// Framing applied to every output of a primitive built from a key
///
/// `Tink`, `Legacy`, and `Crunchy` all frame with the same 5-byte prefix
/// (format tag plus big-endian key id); `Raw` prepends nothing. The prefix
/// is a pure function of `(kind, key_id)` and is computed once at
/// primitive-set assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputPrefixKind {
    /// No framing bytes
    Raw,
    /// 5-byte framing: tag `0x01` + big-endian key id
    Tink,
    /// Framed like `Tink`; differs only in a downstream hashing convention
    Legacy,
    /// Framed like `Tink`; differs only in a downstream hashing convention
    Crunchy,
}

impl OutputPrefixKind {
    /// Whether outputs under this kind carry identifying framing bytes
    pub fn is_prefixed(self) -> bool {
        !matches!(self, OutputPrefixKind::Raw)
    }
}

/// Role a primitive instance serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Produces signatures over messages
    Sign,
    /// Checks signatures over messages
    Verify,
    /// Authenticated encryption with associated data, both directions
    Aead,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Sign => f.write_str("sign"),
            PrimitiveKind::Verify => f.write_str("verify"),
            PrimitiveKind::Aead => f.write_str("aead"),
        }
    }
}

/// Declarative recipe for generating a new key
///
/// Two templates are interchangeable iff all three fields are equal; the
/// format parameters are opaque bytes interpreted only by the key manager
/// registered for `type_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyTemplate {
    /// Algorithm family the generated key belongs to
    pub type_id: KeyTypeId,
    /// Type-specific format parameters, opaque to the registry
    pub format: Vec<u8>,
    /// Framing applied to outputs of primitives built from the key
    pub prefix_kind: OutputPrefixKind,
}

impl KeyTemplate {
    /// Assemble a template from its three parts
    pub fn new(
        type_id: impl Into<KeyTypeId>,
        format: Vec<u8>,
        prefix_kind: OutputPrefixKind,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            format,
            prefix_kind,
        }
    }
}

/// Opaque key payload, zeroed on drop
///
/// The bytes are never exposed through `Debug` and compare in constant
/// time. Only the key manager owning the matching type identifier may
/// interpret them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyBytes {
    data: Vec<u8>,
}

impl KeyBytes {
    /// Take ownership of raw payload bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Copy payload bytes out of a slice
    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            data: slice.to_vec(),
        }
    }

    /// Borrow the payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty (destroyed keys)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interpret the payload as a fixed-size array
    ///
    /// # Errors
    ///
    /// Returns `InvalidLength` if the payload is not exactly `N` bytes.
    pub fn to_array<const N: usize>(&self) -> Result<[u8; N]> {
        if self.data.len() != N {
            return Err(Error::InvalidLength {
                context: "KeyBytes::to_array",
                expected: N,
                actual: self.data.len(),
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data);
        Ok(out)
    }
}

impl PartialEq for KeyBytes {
    fn eq(&self, other: &Self) -> bool {
        self.data.ct_eq(&other.data).into()
    }
}

impl Eq for KeyBytes {}

impl fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyBytes({} bytes)", self.data.len())
    }
}

/// Typed, versioned key material plus status and assigned identifier
///
/// Created by a key manager during generation; the payload is never
/// mutated afterwards. Status changes replace the record wholesale via
/// [`KeyMaterial::transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    type_id: KeyTypeId,
    key_id: KeyId,
    status: KeyStatus,
    prefix_kind: OutputPrefixKind,
    payload: KeyBytes,
}

impl KeyMaterial {
    /// Assemble a record from freshly generated payload
    pub fn new(
        type_id: KeyTypeId,
        key_id: KeyId,
        status: KeyStatus,
        prefix_kind: OutputPrefixKind,
        payload: KeyBytes,
    ) -> Self {
        Self {
            type_id,
            key_id,
            status,
            prefix_kind,
            payload,
        }
    }

    /// Algorithm family of this key
    pub fn type_id(&self) -> &KeyTypeId {
        &self.type_id
    }

    /// Keyset-scoped numeric identifier
    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    /// Current lifecycle status
    pub fn status(&self) -> KeyStatus {
        self.status
    }

    /// Framing kind for outputs of primitives built from this key
    pub fn prefix_kind(&self) -> OutputPrefixKind {
        self.prefix_kind
    }

    /// Opaque payload bytes
    pub fn payload(&self) -> &KeyBytes {
        &self.payload
    }

    /// Produce the record that replaces this one after a status change
    ///
    /// Destroying clears the payload but keeps the identifier as a
    /// tombstone. A destroyed record admits no further transitions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` when attempting to resurrect a destroyed key.
    pub fn transition(&self, status: KeyStatus) -> Result<Self> {
        if self.status == KeyStatus::Destroyed && status != KeyStatus::Destroyed {
            return Err(Error::InvalidKey {
                context: "KeyMaterial::transition",
                message: String::from("a destroyed key cannot change status"),
            });
        }
        let payload = if status == KeyStatus::Destroyed {
            KeyBytes::new(Vec::new())
        } else {
            self.payload.clone()
        };
        Ok(Self {
            type_id: self.type_id.clone(),
            key_id: self.key_id,
            status,
            prefix_kind: self.prefix_kind,
            payload,
        })
    }
}
